use crate::core::config::data::Config;

impl Config {
    pub fn print_all(&self) {
        println!("Current configuration:");
        match &self.log_level {
            Some(level) => println!("  log-level: {level}"),
            None => println!("  log-level: (unset)"),
        }
        match self.pretty_output() {
            true => println!("  pretty: on"),
            false => println!("  pretty: off"),
        }
        match self.include_avatar() {
            true => println!("  avatar: on"),
            false => println!("  avatar: off"),
        }
    }
}
