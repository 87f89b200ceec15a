pub mod choice;
pub mod dataset;
pub mod outcome;
pub mod passage;
pub mod question;
pub mod quiz;
