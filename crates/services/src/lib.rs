pub mod keyword_index;
pub mod launcher;
pub mod matcher;
pub mod threshold;
