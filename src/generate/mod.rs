//! Renders one cataloged peripheral into C-preprocessor text.

pub mod interrupt;
pub mod register;

use std::fmt::Write;

use anyhow::{anyhow, Result};
use log::debug;

use crate::catalog::Catalog;

/// Banner separating peripheral blocks in the generated source.
const PERIPHERAL_BANNER: &str = "/* ############################################### */";

/// A rendered peripheral block and the file stem it belongs to.
#[derive(Debug)]
pub struct RenderOutput {
    /// Group name of the peripheral, naming the `<group>.c`/`<group>.h` pair.
    pub group: String,
    /// The text to append, banners included.
    pub block: String,
}

/// Renders the peripheral called `name`: its base-address define, one
/// accessor define per register with the bitfield masks nested under it,
/// and a trailing comment listing the interrupt vectors.
pub fn render(catalog: &Catalog, name: &str) -> Result<RenderOutput> {
    let peripheral = catalog
        .get(name)
        .ok_or_else(|| anyhow!("peripheral \"{name}\" doesn't exist"))?;
    debug!("rendering peripheral {name}");

    let mut block = String::new();
    writeln!(block)?;
    writeln!(block)?;
    writeln!(block, "{PERIPHERAL_BANNER}")?;
    writeln!(block, "/* base address of the module \"{}\" */", peripheral.name)?;
    writeln!(
        block,
        "#define {}_BASE_ADDR ({})",
        peripheral.name, peripheral.base_address
    )?;
    for reg in &peripheral.registers {
        register::render(&mut block, peripheral, reg)?;
    }
    writeln!(block, "{PERIPHERAL_BANNER}")?;
    interrupt::render(&mut block, peripheral)?;

    Ok(RenderOutput {
        group: peripheral.group.clone(),
        block,
    })
}
