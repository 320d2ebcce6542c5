use std::fmt::Write;

use anyhow::Result;

use crate::catalog::Peripheral;

/// Renders the trailing comment listing the peripheral's interrupt vectors.
/// Peripherals without interrupts get nothing, not even an empty comment.
pub fn render(out: &mut String, peripheral: &Peripheral) -> Result<()> {
    if peripheral.interrupts.is_empty() {
        return Ok(());
    }
    writeln!(out)?;
    writeln!(
        out,
        "/* Peripheral \"{}\" has the following IRQs:",
        peripheral.name
    )?;
    for irq in &peripheral.interrupts {
        writeln!(out, " *    IRQ #{}: {}", irq.number, irq.description)?;
    }
    writeln!(out, " */")?;
    Ok(())
}
