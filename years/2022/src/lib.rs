//! Solutions for Advent of Code 2022.

pub mod d03;
pub mod d06;
