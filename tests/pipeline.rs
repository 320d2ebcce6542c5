//! End-to-end runs over the whole parse, catalog, render, append pipeline.

use pretty_assertions::assert_eq;

use svd2c::{generate, Catalog, OutputSink, Value};

const DESCRIPTOR: &str = r#"
<device schemaVersion="1.1">
  <name>EXAMPLE</name>
  <peripherals>
    <peripheral>
      <name>UART0</name>
      <description>Universal asynchronous
          receiver transmitter</description>
      <groupName>uart</groupName>
      <baseAddress>0x40001000</baseAddress>
      <interrupt>
        <name>UART0_IRQ</name>
        <description>UART0 global interrupt</description>
        <value>3</value>
      </interrupt>
      <registers>
        <register>
          <name>CTRL</name>
          <description>Control register</description>
          <addressOffset>0x00</addressOffset>
          <resetValue>0x0</resetValue>
          <fields>
            <field>
              <name>ENABLE</name>
              <description>Peripheral enable</description>
              <bitOffset>0</bitOffset>
              <bitWidth>1</bitWidth>
            </field>
          </fields>
        </register>
        <register>
          <name>BAUD</name>
          <description>Baud rate divider</description>
          <addressOffset>0x04</addressOffset>
          <resetValue>0x1A0</resetValue>
          <fields>
            <field>
              <name>DIV</name>
              <description>Integer divider</description>
              <bitOffset>4</bitOffset>
              <bitWidth>12</bitWidth>
            </field>
          </fields>
        </register>
      </registers>
    </peripheral>
    <peripheral derivedFrom="UART0">
      <name>UART1</name>
      <baseAddress>0x40002000</baseAddress>
      <interrupt>
        <name>UART1_IRQ</name>
        <description>UART1 global interrupt</description>
        <value>4</value>
      </interrupt>
    </peripheral>
  </peripherals>
</device>
"#;

fn catalog() -> Catalog {
    Catalog::from_descriptor(&Value::parse(DESCRIPTOR).unwrap()).unwrap()
}

#[test]
fn generates_the_uart_macro_pair() {
    let dir = tempfile::tempdir().unwrap();
    let output = generate::render(&catalog(), "UART0").unwrap();
    OutputSink::new(dir.path())
        .append(&output.group, &output.block)
        .unwrap();

    let source = std::fs::read_to_string(dir.path().join("uart.c")).unwrap();
    assert!(source.starts_with(
        "/* libs */\n#include <stdint.h>\n/* own */\n#include \"uart.h\"\n"
    ));
    assert!(source.contains("/* base address of the module \"UART0\" */"));
    assert!(source.contains("#define UART0_BASE_ADDR (0x40001000)"));
    assert!(source.contains(
        "/* base address and masks for register: UART0.CTRL (Control register), reset value = 0x0 */"
    ));
    assert!(source.contains(
        "#define UART0_CTRL (*((volatile uint32_t*)(UART0_BASE_ADDR + 0x00)))"
    ));
    assert!(source.contains("#define CTRL_ENABLE_MASK (0xFFFFFFFE)"));
    assert!(source.contains("#define BAUD_DIV_MASK (0xFFFF000F)"));
    assert!(source.contains(" *    IRQ #19: UART0 global interrupt"));
    // Multi-line description collapsed on the way into the catalog.
    assert!(!source.contains("asynchronous\n"));

    let header = std::fs::read(dir.path().join("uart.h")).unwrap();
    assert!(header.is_empty());
}

#[test]
fn derived_peripherals_share_the_output_pair() {
    let dir = tempfile::tempdir().unwrap();
    let sink = OutputSink::new(dir.path());
    let catalog = catalog();
    for name in ["UART0", "UART1"] {
        let output = generate::render(&catalog, name).unwrap();
        assert_eq!(output.group, "uart");
        sink.append(&output.group, &output.block).unwrap();
    }

    let source = std::fs::read_to_string(dir.path().join("uart.c")).unwrap();
    assert_eq!(source.matches("/* libs */").count(), 1);
    assert!(source.contains("#define UART1_BASE_ADDR (0x40002000)"));
    assert!(source.contains(
        "#define UART1_CTRL (*((volatile uint32_t*)(UART1_BASE_ADDR + 0x00)))"
    ));
    assert!(source.contains(" *    IRQ #20: UART1 global interrupt"));
    // Register layout carries over to the derived peripheral, the bitfield
    // documentation does not.
    assert_eq!(source.matches("reset value = 0x1A0").count(), 2);
    assert_eq!(source.matches("CTRL_ENABLE_MASK").count(), 1);
}

#[test]
fn repeated_runs_append_rather_than_rewrite() {
    let dir = tempfile::tempdir().unwrap();
    let sink = OutputSink::new(dir.path());
    let catalog = catalog();
    for _ in 0..2 {
        let output = generate::render(&catalog, "UART0").unwrap();
        sink.append(&output.group, &output.block).unwrap();
    }

    let source = std::fs::read_to_string(dir.path().join("uart.c")).unwrap();
    assert_eq!(source.matches("/* libs */").count(), 1);
    assert_eq!(source.matches("#define UART0_BASE_ADDR").count(), 2);
}

#[test]
fn an_unknown_peripheral_touches_no_files() {
    let dir = tempfile::tempdir().unwrap();
    let err = generate::render(&catalog(), "SPI0").unwrap_err();
    assert_eq!(err.to_string(), "peripheral \"SPI0\" doesn't exist");
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}
