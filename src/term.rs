use colored::Colorize;

pub fn warning(msg: &str) {
    println!("{}", format!(" [WARNING]: {msg}").yellow().bold());
}

pub fn info(msg: &str) {
    println!("{}", format!(" [INFO]: {msg}").yellow().bold());
}

pub fn success(msg: &str) {
    println!("{}", format!(" [SUCCESS]: {msg}").green().bold());
}

pub fn hint(msg: &str) {
    println!("{}", msg.yellow().italic());
}
