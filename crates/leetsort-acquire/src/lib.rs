pub mod leetcode;
pub mod normalize;
pub mod output;
