//! Task expression language
//!
//! Operators address records with `|`-separated task columns, `/`-separated
//! locations and `&`-joined assignments or line queries.

mod assignment;
mod codec;
mod path;

pub use assignment::{
    AssignedText, Assignment, normalize_key, parse_assignment, parse_assignment_list,
};
pub use codec::{Delimiter, column, split};
pub use path::{LINE_COUNT_FIELDS, Path, is_line_count_field};
