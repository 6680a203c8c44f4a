//! Console front end for the CLI binary.

use super::{Notice, Ui};

/// Prints view switches and values to stdout, notices to stderr.
#[derive(Debug, Default)]
pub struct ConsoleUi;

impl Ui for ConsoleUi {
    fn show_login(&mut self) {
        println!("Not signed in. Run `pipe-points login <email>` to sign in.");
    }

    fn show_dashboard(&mut self) {
        println!("Signed in.");
    }

    fn display_points(&mut self, points: u64) {
        println!("Points: {}", points);
    }

    fn notify(&mut self, notice: Notice) {
        eprintln!("{}", notice);
    }
}
