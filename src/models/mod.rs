pub mod change;
pub mod freshservice;
pub mod outcome;
