// Allow pre-existing clippy lints across the codebase
#![allow(
    clippy::collapsible_if,
    clippy::needless_range_loop,
    clippy::manual_div_ceil,
    clippy::too_many_arguments
)]

pub mod histogram;
pub mod key;
pub mod merge;
