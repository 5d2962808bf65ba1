use crate::version::BUILD_INFO;

pub fn run() {
    println!("{}", BUILD_INFO);
}
