pub mod detail;
pub mod graph;
pub mod lineage;
