pub mod collect;
pub mod deliver;
pub mod reflect;
pub mod summarize;
