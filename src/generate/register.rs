use std::fmt::Write;

use anyhow::Result;

use crate::catalog::{Peripheral, Register};
use crate::mask;

/// Banner separating register blocks inside a peripheral.
const REGISTER_BANNER: &str = "/* === === === === === === === === === === === === */";

/// Renders one register: the volatile accessor define at `base + offset`,
/// then one clear-mask define per bitfield. Mask defines are keyed by
/// register name alone, so two peripherals sharing a register layout would
/// collide; derived peripherals avoid that by carrying no bitfields.
pub fn render(out: &mut String, peripheral: &Peripheral, register: &Register) -> Result<()> {
    writeln!(out)?;
    writeln!(out, "{REGISTER_BANNER}")?;
    writeln!(
        out,
        "/* base address and masks for register: {}.{} ({}), reset value = {} */",
        peripheral.name, register.name, register.description, register.reset_value
    )?;
    writeln!(
        out,
        "#define {}_{} (*((volatile uint32_t*)({}_BASE_ADDR + {})))",
        peripheral.name, register.name, peripheral.name, register.address_offset
    )?;

    for field in &register.fields {
        let mask = mask::format_mask(mask::clear_mask(field.width, field.offset)?);
        writeln!(
            out,
            "/* mask for bitfield \"{}.{}\" ({}) */",
            register.name, field.name, field.description
        )?;
        writeln!(out, "#define {}_{}_MASK ({})", register.name, field.name, mask)?;
    }
    writeln!(out, "{REGISTER_BANNER}")?;
    Ok(())
}
