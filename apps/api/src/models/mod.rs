pub mod rows;
pub mod skill;
