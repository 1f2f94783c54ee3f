use crate::encoder::Program;
use arch::inst::Inst;
use color_print::cformat;

pub fn print_dump(path: &str, program: &Program) {
    println!(
        "{}+------[{}]{}",
        "-".repeat(25),
        path,
        "-".repeat(45usize.saturating_sub(path.len()))
    );
    for line in &program.listing {
        let body = match line.pc {
            Some(pc) => {
                let word = program.words[pc as usize];
                let code = arch::source::normalize(&line.raw);
                format!(
                    "[{:05}] {:016b} | {:>5}:   {:<24} {}",
                    pc,
                    word,
                    line.no,
                    Inst::from_bin(word).cformat(),
                    cformat!("<dim>{}</>", code)
                )
            }
            None => {
                let label = cformat!("<g>{}</>", arch::source::normalize(&line.raw));
                format!("{:24} | {:>5}: {}", "", line.no, label)
            }
        };
        println!("{}", body);
    }
    println!("-------------------------+---------------------------------------------------");
    for (name, addr) in program.symbols.iter() {
        println!("{:>24} | {}", cformat!("<c>{}</>", name), addr);
    }
}
