pub mod post_gen;
pub mod pre_gen;
