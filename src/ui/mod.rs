pub mod detail;
pub mod panels;
pub mod plot;
pub mod table;

/// Label of the "no filter" entry of every combo box.
pub const ALL: &str = "All";
