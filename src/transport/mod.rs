/// Local filesystem discovery of dataset files.
pub mod fs;
