pub mod practice;
pub mod score;
