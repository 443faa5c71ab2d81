//! WebAssembly bridge exposing the catenary solver to a JavaScript front end.

mod report;
mod solver;

pub use solver::WasmCatenarySolver;
