use anyhow;
use intcode::*;

/// Restore the "1202 program alarm" state the gravity assist program had
/// just before the computer caught fire.
fn fix_1202(program: &mut Vec<isize>) {
    program[1] = 12;
    program[2] = 2;
}

fn main() -> anyhow::Result<()> {
    let mut program = stdin_to_prog()?;

    if !cfg!(feature = "part2") {
        fix_1202(&mut program);

        let mut cpu = IntcodeComputer::new(program);

        cpu.execute()?;

        println!("{}", cpu.memory[0]);
    } else {
        let pair = find_ad_nauseum(&program, 19690720, 0, 99)?;

        println!("noun {} verb {}", pair.noun, pair.verb);
        println!("{}", pair.checksum());
    }

    Ok(())
}
