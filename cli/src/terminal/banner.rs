use colored::*;

use crate::terminal::print;

const BANNER: &str = r#"
                                  _
              _ __ ___  __ _  ___| |__  _ __
             | '__/ _ \/ _` |/ __| '_ \| '__|
             | | |  __/ (_| | (__| | | | |
             |_|  \___|\__,_|\___|_| |_|_|
"#;

pub fn print() {
    print::print(&format!("{}", BANNER.bright_green().bold()));
}
