//! Resolution of `defineProps` and `withDefaults` of Vue `<script setup>`
//! into a runtime props declaration.

#[macro_use]
extern crate lazy_static;

pub mod atoms;
pub mod emit;
pub mod error;
pub mod script;
pub mod structs;

#[cfg(test)]
mod test_utils;

pub use script::{
    resolve_type::{ResolutionResult, Types, TypesSet},
    setup::{analyze_script_setup, gen_runtime_props, transform_script_setup_props, TransformPropsResult},
};
pub use structs::*;
