//! Help and usage text generated from the command catalog.

use std::io::{self, Write};

use crate::catalog::Catalog;
use crate::output::Printer;

/// Print help for one command, or for all of them when `name` is `None`.
///
/// An unknown `name` is reported on the diagnostic stream and is not an
/// error. The full listing has one `name -- description` line per command
/// in name order, names right-aligned to the longest one.
pub fn show_help<O: Write, E: Write>(
    printer: &mut Printer<O, E>,
    catalog: &Catalog,
    name: Option<&str>,
) -> io::Result<()> {
    match name {
        Some(name) => match catalog.get(name) {
            Some((key, entry)) => {
                printer.print_line(format_args!("{} -- {}", key, entry.description))
            }
            None => printer.print_error(format_args!("no such command: {}", name)),
        },
        None => write_listing(printer.out(), catalog),
    }
}

fn write_listing(out: &mut impl Write, catalog: &Catalog) -> io::Result<()> {
    let width = catalog.max_name_len();
    for (name, entry) in catalog.iter() {
        writeln!(out, "{:>width$} -- {}", name, entry.description, width = width)?;
    }
    Ok(())
}

/// Write the usage banner followed by the full command listing.
pub fn write_usage(out: &mut impl Write, program: &str, catalog: &Catalog) -> io::Result<()> {
    write!(
        out,
        "Usage: {program}\n \
         -m|-s <meta server host name>\n \
         -p <port>\n \
         -f <config file name>\n \
         [-v]\n \
         --  <cmd> <cmd> ...\n\
         Where cmd is one of the following:\n"
    )?;
    write_listing(out, catalog)
}
