use anyhow;
use num_derive::FromPrimitive;
use num_traits::FromPrimitive;
use std::convert::TryFrom;
use std::fs::read_to_string;
use std::io::{self, Read};
use std::str::FromStr;
use thiserror::Error;

#[derive(FromPrimitive, Debug, PartialEq, Eq, Clone, Copy)]
pub enum Opcode {
    ADD = 1,
    MUL = 2,
    HLT = 99,
}

impl Opcode {
    fn instruction_length(&self) -> usize {
        use Opcode::*;
        match self {
            ADD | MUL => 4,
            HLT => 0,
        }
    }
}

/// Fatal machine faults. Execution aborts immediately; nothing is retried.
#[derive(Debug, Error, PartialEq, Eq, Clone, Copy)]
pub enum ExecError {
    #[error("Unknown opcode {0}")]
    UnknownOpcode(isize),
    #[error("Illegal address {0}")]
    IllegalAddress(isize),
}

fn convert_addr(i: isize) -> Result<usize, ExecError> {
    usize::try_from(i).map_err(|_| ExecError::IllegalAddress(i))
}

enum Step {
    Continue,
    Halt,
}

pub struct IntcodeComputer {
    pub pc: usize,
    pub memory: Vec<isize>,
}

impl IntcodeComputer {
    pub fn new(program: Vec<isize>) -> IntcodeComputer {
        IntcodeComputer { pc: 0, memory: program }
    }

    fn decode(&self) -> Result<Opcode, ExecError> {
        let int = self.fetch(self.pc)?;
        Opcode::from_isize(int).ok_or(ExecError::UnknownOpcode(int))
    }

    fn fetch(&self, idx: usize) -> Result<isize, ExecError> {
        self.memory
            .get(idx)
            .copied()
            .ok_or(ExecError::IllegalAddress(idx as isize))
    }

    /// Arguments are positions: the cell at `pc + offset` holds the address
    /// of the value, not the value itself.
    fn load_arg(&self, offset: usize) -> Result<isize, ExecError> {
        let addr = convert_addr(self.fetch(self.pc + offset)?)?;
        self.fetch(addr)
    }

    fn store_arg(&mut self, offset: usize, value: isize) -> Result<(), ExecError> {
        let addr = convert_addr(self.fetch(self.pc + offset)?)?;
        match self.memory.get_mut(addr) {
            Some(cell) => {
                *cell = value;
                Ok(())
            }
            None => Err(ExecError::IllegalAddress(addr as isize)),
        }
    }

    fn exec_current(&mut self) -> Result<Step, ExecError> {
        use Opcode::*;
        let opcode = self.decode()?;
        match opcode {
            ADD => {
                let augend = self.load_arg(1)?;
                let addend = self.load_arg(2)?;
                self.store_arg(3, augend + addend)?;
            }
            MUL => {
                let multiplicand = self.load_arg(1)?;
                let multiplier = self.load_arg(2)?;
                self.store_arg(3, multiplicand * multiplier)?;
            }
            HLT => return Ok(Step::Halt),
        }
        self.pc += opcode.instruction_length();
        Ok(Step::Continue)
    }

    /// Run to completion. Ok means opcode 99 was reached; any fault aborts
    /// with the memory state as of the failing instruction.
    pub fn execute(&mut self) -> Result<(), ExecError> {
        loop {
            if let Step::Halt = self.exec_current()? {
                return Ok(());
            }
        }
    }
}

/// The noun/verb pair the search settled on.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct NounVerb {
    pub noun: isize,
    pub verb: isize,
}

impl NounVerb {
    pub fn checksum(&self) -> isize {
        100 * self.noun + self.verb
    }
}

#[derive(Debug, Error, PartialEq, Eq, Clone, Copy)]
#[error("No noun/verb pair in {min}..={max} leaves {target} at address 0")]
pub struct SearchExhausted {
    pub min: isize,
    pub max: isize,
    pub target: isize,
}

/// Brute-force the noun (address 1) and verb (address 2) that leave `target`
/// at address 0 once the program halts. Verb varies fastest; every trial runs
/// on its own fresh copy of `template`, never on a previous trial's memory.
/// Trials that fault can't have produced the target and are skipped.
///
/// Panics if `template` has fewer than three cells.
pub fn find_ad_nauseum(
    template: &[isize],
    target: isize,
    min: isize,
    max: isize,
) -> Result<NounVerb, SearchExhausted> {
    for noun in min..=max {
        for verb in min..=max {
            let mut trial = template.to_vec();
            trial[1] = noun;
            trial[2] = verb;

            let mut cpu = IntcodeComputer::new(trial);

            match cpu.execute() {
                Ok(()) if cpu.memory[0] == target => return Ok(NounVerb { noun, verb }),
                _ => continue,
            }
        }
    }
    Err(SearchExhausted { min, max, target })
}

pub fn parse_prog(text: &str) -> anyhow::Result<Vec<isize>> {
    text.trim()
        .split(',')
        .map(|cell| -> anyhow::Result<isize> {
            let num = isize::from_str(cell.trim())?;
            Ok(num)
        })
        .collect()
}

pub fn stdin_to_prog() -> anyhow::Result<Vec<isize>> {
    let stdin = io::stdin();
    let mut text = String::new();
    stdin.lock().read_to_string(&mut text)?;
    parse_prog(&text)
}

pub fn file_to_prog(path: &str) -> anyhow::Result<Vec<isize>> {
    parse_prog(&read_to_string(path)?)
}
