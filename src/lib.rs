//! C register access macro generator for [CMSIS-SVD] files
//!
//! [CMSIS-SVD]: https://www.keil.com/pack/doc/CMSIS/SVD/html/index.html
//!
//! An SVD file is an XML file that describes the hardware features of a
//! microcontroller: the peripherals available to the device, where the
//! registers of each peripheral are located in memory, how those registers
//! split into bitfields and which interrupt lines the peripheral drives.
//!
//! `svd2c` is a command line tool that turns one peripheral of an SVD file
//! into C-preprocessor definitions: a base-address macro, a volatile
//! accessor macro per register, a clear-mask macro per bitfield and a
//! comment listing the peripheral's interrupt vectors. The output is
//! appended to a `<group>.c`/`<group>.h` pair named after the peripheral's
//! group, so related peripherals accumulate in one file.
//!
//! The pipeline is linear: [`descriptor::Value::parse`] folds the XML into
//! a schema-agnostic tree, [`catalog::Catalog::from_descriptor`] normalizes
//! that tree into peripherals, registers, bitfields and interrupts,
//! [`generate::render`] turns one peripheral into text and
//! [`output::OutputSink::append`] writes it out.

pub mod catalog;
pub mod descriptor;
pub mod generate;
pub mod mask;
pub mod output;
pub mod util;

pub use crate::catalog::Catalog;
pub use crate::descriptor::Value;
pub use crate::generate::RenderOutput;
pub use crate::output::OutputSink;
