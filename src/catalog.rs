//! The normalized peripheral catalog.
//!
//! [`Catalog::from_descriptor`] walks the `device.peripherals.peripheral`
//! entries of a folded descriptor and produces one [`Peripheral`] per entry,
//! in document order. Free-text descriptions are whitespace-collapsed on the
//! way in, interrupt values are rebased onto absolute vector numbers, and
//! entries carrying a `derivedFrom` attribute are resolved against the
//! peripherals cataloged before them.
//!
//! Addresses, offsets and reset values are kept in their descriptor spelling
//! (`0x40001000` stays `0x40001000`) because the generated macros quote them
//! verbatim.

use anyhow::{anyhow, bail, Context, Result};
use log::debug;

use crate::descriptor::Value;
use crate::mask;
use crate::util;

/// The 16 exception vectors a Cortex-M core places before device
/// interrupts. Descriptor interrupt values are device-relative; the
/// generated comments list absolute vector numbers.
pub const CORE_VECTORS: u32 = 16;

/// An interrupt line, with its absolute vector number.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Interrupt {
    pub name: String,
    pub number: u32,
    pub description: String,
}

/// A named bit range inside a 32-bit register.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BitField {
    pub name: String,
    pub description: String,
    pub offset: u32,
    pub width: u32,
}

/// A memory-mapped register of one peripheral.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Register {
    pub name: String,
    pub description: String,
    /// Offset from the peripheral base, verbatim from the descriptor.
    pub address_offset: String,
    /// Reset value, verbatim from the descriptor.
    pub reset_value: String,
    pub fields: Vec<BitField>,
}

/// A peripheral, either fully specified or derived from another one.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Peripheral {
    pub name: String,
    /// Base address, verbatim from the descriptor.
    pub base_address: String,
    /// Group name, which doubles as the output file stem. Derived
    /// peripherals inherit it from their source.
    pub group: String,
    pub description: String,
    pub interrupts: Vec<Interrupt>,
    pub registers: Vec<Register>,
}

/// Every peripheral of the device, in document order. Built once and read
/// only afterwards.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Catalog {
    pub peripherals: Vec<Peripheral>,
}

impl Catalog {
    /// Builds the catalog from a folded descriptor tree.
    pub fn from_descriptor(tree: &Value) -> Result<Catalog> {
        let device = tree
            .get("device")
            .ok_or_else(|| anyhow!("the descriptor has no \"device\" root element"))?;
        let entries = device
            .get("peripherals")
            .and_then(|p| p.get("peripheral"))
            .ok_or_else(|| anyhow!("the descriptor declares no peripherals"))?;

        let mut catalog = Catalog::default();
        for entry in entries.as_sequence() {
            let peripheral = catalog.build_peripheral(entry)?;
            if catalog.get(&peripheral.name).is_some() {
                bail!("duplicate peripheral \"{}\"", peripheral.name);
            }
            debug!(
                "cataloged peripheral {} with {} registers",
                peripheral.name,
                peripheral.registers.len()
            );
            catalog.peripherals.push(peripheral);
        }
        Ok(catalog)
    }

    /// Looks a peripheral up by name.
    pub fn get(&self, name: &str) -> Option<&Peripheral> {
        self.peripherals.iter().find(|p| p.name == name)
    }

    fn build_peripheral(&self, entry: &Value) -> Result<Peripheral> {
        let name = text(entry, "name", "a peripheral entry")?.to_string();
        let scope = format!("peripheral \"{name}\"");
        let base_address = text(entry, "baseAddress", &scope)?.to_string();
        // The entry's own interrupt block applies whether the peripheral is
        // fully specified or derived.
        let interrupts = interrupts(entry, &name)?;

        if let Some(source) = entry.get("@derivedFrom") {
            let source = source
                .as_str()
                .ok_or_else(|| anyhow!("{scope} has a malformed derivedFrom attribute"))?;
            return self.derive_peripheral(source, name, base_address, interrupts);
        }

        let description = util::respace(text(entry, "description", &scope)?);
        let group = text(entry, "groupName", &scope)?.to_string();
        let registers = registers(entry, &name)?;
        Ok(Peripheral {
            name,
            base_address,
            group,
            description,
            interrupts,
            registers,
        })
    }

    /// Copies the already-cataloged `source` under a new name and base
    /// address. Register layout, reset values and descriptions carry over;
    /// the bitfields do not, so shared layouts are documented only once in
    /// the generated output.
    fn derive_peripheral(
        &self,
        source: &str,
        name: String,
        base_address: String,
        interrupts: Vec<Interrupt>,
    ) -> Result<Peripheral> {
        let source = self.get(source).ok_or_else(|| {
            anyhow!(
                "peripheral \"{name}\" derives from \"{source}\", which is not (yet) in the \
                 catalog; derivation sources must appear before their dependents"
            )
        })?;
        let registers = source
            .registers
            .iter()
            .map(|register| Register {
                fields: Vec::new(),
                ..register.clone()
            })
            .collect();
        Ok(Peripheral {
            name,
            base_address,
            group: source.group.clone(),
            description: source.description.clone(),
            interrupts,
            registers,
        })
    }
}

fn text<'a>(entry: &'a Value, key: &str, scope: &str) -> Result<&'a str> {
    match entry.get(key) {
        None => Err(anyhow!("{scope} is missing the required \"{key}\" element")),
        Some(value) => value
            .as_str()
            .ok_or_else(|| anyhow!("{scope} has a malformed \"{key}\" element")),
    }
}

fn interrupts(entry: &Value, peripheral: &str) -> Result<Vec<Interrupt>> {
    let mut interrupts: Vec<Interrupt> = Vec::new();
    let Some(block) = entry.get("interrupt") else {
        return Ok(interrupts);
    };
    for irq in block.as_sequence() {
        let name = text(
            irq,
            "name",
            &format!("an interrupt on peripheral \"{peripheral}\""),
        )?
        .to_string();
        let scope = format!("interrupt \"{peripheral}.{name}\"");
        let value = util::parse_u32(text(irq, "value", &scope)?)
            .with_context(|| format!("{scope} has a malformed value"))?;
        let number = CORE_VECTORS
            .checked_add(value)
            .ok_or_else(|| anyhow!("{scope} declares an impossible vector number"))?;
        let description = util::respace(text(irq, "description", &scope)?);
        if interrupts.iter().any(|i| i.name == name) {
            bail!("duplicate interrupt \"{name}\" on peripheral \"{peripheral}\"");
        }
        interrupts.push(Interrupt {
            name,
            number,
            description,
        });
    }
    Ok(interrupts)
}

fn registers(entry: &Value, peripheral: &str) -> Result<Vec<Register>> {
    let block = entry
        .get("registers")
        .and_then(|r| r.get("register"))
        .ok_or_else(|| {
            anyhow!("peripheral \"{peripheral}\" is missing the required \"registers\" element")
        })?;
    let mut registers: Vec<Register> = Vec::new();
    for reg in block.as_sequence() {
        let name = text(
            reg,
            "name",
            &format!("a register on peripheral \"{peripheral}\""),
        )?
        .to_string();
        let scope = format!("register \"{peripheral}.{name}\"");
        let description = util::respace(text(reg, "description", &scope)?);
        let address_offset = text(reg, "addressOffset", &scope)?.to_string();
        let reset_value = text(reg, "resetValue", &scope)?.to_string();
        let fields = bit_fields(reg, peripheral, &name)?;
        if registers.iter().any(|r| r.name == name) {
            bail!("duplicate register \"{name}\" on peripheral \"{peripheral}\"");
        }
        registers.push(Register {
            name,
            description,
            address_offset,
            reset_value,
            fields,
        });
    }
    Ok(registers)
}

fn bit_fields(reg: &Value, peripheral: &str, register: &str) -> Result<Vec<BitField>> {
    let block = reg
        .get("fields")
        .and_then(|f| f.get("field"))
        .ok_or_else(|| {
            anyhow!("register \"{peripheral}.{register}\" is missing the required \"fields\" element")
        })?;
    let mut fields: Vec<BitField> = Vec::new();
    for field in block.as_sequence() {
        let name = text(
            field,
            "name",
            &format!("a bitfield on register \"{peripheral}.{register}\""),
        )?
        .to_string();
        let scope = format!("bitfield \"{peripheral}.{register}.{name}\"");
        let description = util::respace(text(field, "description", &scope)?);
        let offset = util::parse_u32(text(field, "bitOffset", &scope)?)
            .with_context(|| format!("{scope} has a malformed bitOffset"))?;
        let width = util::parse_u32(text(field, "bitWidth", &scope)?)
            .with_context(|| format!("{scope} has a malformed bitWidth"))?;
        mask::check_range(width, offset)
            .with_context(|| format!("{scope} declares an impossible bit range"))?;
        if fields.iter().any(|f| f.name == name) {
            bail!("duplicate bitfield \"{name}\" on register \"{peripheral}.{register}\"");
        }
        fields.push(BitField {
            name,
            description,
            offset,
            width,
        });
    }
    Ok(fields)
}
