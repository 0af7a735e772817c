pub mod demo;
pub mod matrix_file;
pub mod run;
pub mod solve;
