use anyhow::Result;

use helios_units::UnitConverter;

use crate::cli::ConvertArgs;

/// Convert a value between two unit expressions.
pub fn run(args: ConvertArgs) -> Result<()> {
    let converter = UnitConverter::new(&args.from, &args.to)?;
    let converted = converter.convert_from(args.value);
    println!("{} {} = {} {}", args.value, args.from, converted, args.to);
    Ok(())
}
