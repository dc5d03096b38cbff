/// Domain models
///
/// Passive data records for the planning domain, organized by entity:
///
/// - `user`: accounts and provisional team members
/// - `project`: top-level planning unit with participants
/// - `area`: ordered project subdivision
/// - `responsibility`: grouping label for tasks within an area
/// - `task`: unit of work with assignee, deadline, dependencies
/// - `meeting`: scheduled project meeting with attendees
/// - `meeting_note`: one-to-one notes for a meeting
/// - `template`: reusable project blueprint (areas → tasks)
///
/// Persistence lives in `crate::store`; these types carry no queries.

pub mod area;
pub mod meeting;
pub mod meeting_note;
pub mod project;
pub mod responsibility;
pub mod task;
pub mod template;
pub mod user;
