use arch::{inst::Inst, reg::Reg};
use serde::Deserialize;
use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;

use crate::{error::Error, model::State};

use super::Hook;

/// Prints machine state at chosen program addresses.
///
/// The config file maps a ROM address to what should be shown after the
/// instruction there runs:
///
/// ```yaml
/// 12:
///   stack: true
///   ram: [16, 17]
/// ```
#[derive(Debug)]
pub struct Dump {
    file: Option<String>,
    all: bool,
    watch: Vec<u16>,
    list: List,
}

#[derive(Debug, Default, Deserialize)]
#[serde(transparent)]
struct List(HashMap<u16, Config>);

#[derive(Debug, Deserialize)]
struct Config {
    #[serde(default)]
    stack: bool,
    #[serde(default)]
    ram: Vec<u16>,
}

const STACK_BASE: u16 = 256;

impl Dump {
    pub fn arg(file: Option<String>, all: bool, watch: Vec<u16>) -> Result<Self, Error> {
        let list = match &file {
            Some(fname) => {
                let reader = File::open(fname)
                    .map(BufReader::new)
                    .map_err(|e| Error::FileOpen(fname.clone(), e))?;
                serde_yaml::from_reader(reader).map_err(|e| Error::Config(fname.clone(), e))?
            }
            None => List::default(),
        };
        Ok(Self {
            file,
            all,
            watch,
            list,
        })
    }

    fn get(&self, pc: u16) -> Option<&Config> {
        self.list.0.get(&pc)
    }
}

impl Hook for Dump {
    fn init(&mut self, state: State) -> State {
        if self.all {
            println!(" * Dump all");
        }
        if let Some(fname) = &self.file {
            println!(" * Dump[{}] {:?}", self.list.0.len(), fname);
        }
        if !self.watch.is_empty() {
            println!(" * Watch {:?}", self.watch);
        }
        state
    }

    fn exec(&mut self, time: u64, addr: u16, inst: Inst, state: State) -> State {
        if let Some(cfg) = self.get(addr) {
            self.print_reg(time, addr, inst, &state);
            if cfg.stack {
                self.print_stack(&state);
            }
            self.print_ram(&state, &cfg.ram);
        } else if self.all {
            self.print_reg(time, addr, inst, &state);
        }
        state
    }

    fn exit(&mut self, state: &State) {
        println!("[EXIT] pc: {}", state.pc());
        self.print_ram(state, &self.watch);
    }
}

impl Dump {
    fn print_reg(&self, time: u64, addr: u16, inst: Inst, state: &State) {
        println!(" +-------------------------------------------+");
        println!(" | {:>8} | {:05} | {:<24} |", time, addr, inst.to_string());
        println!(
            " | A: {:>6} | D: {:>6} | PC: {:>6}          |",
            state.a(),
            state.d(),
            state.pc()
        );
        println!(
            " | SP: {:>5} | LCL: {:>5} | ARG: {:>5}       |",
            state.reg(Reg::SP),
            state.reg(Reg::LCL),
            state.reg(Reg::ARG)
        );
        println!(
            " | THIS: {:>5} | THAT: {:>5}                 |",
            state.reg(Reg::THIS),
            state.reg(Reg::THAT)
        );
        println!(" +-------------------------------------------+");
    }

    fn print_stack(&self, state: &State) {
        for addr in STACK_BASE..state.reg(Reg::SP) {
            println!(" | {:05} : {:>6} ({:0>4X})", addr, state.get(addr) as i16, state.get(addr));
        }
        println!(" +-------------------------------------------+");
    }

    fn print_ram(&self, state: &State, addrs: &[u16]) {
        for &addr in addrs {
            println!(" | {:05} : {:>6} ({:0>4X})", addr, state.get(addr) as i16, state.get(addr));
        }
        if !addrs.is_empty() {
            println!(" +-------------------------------------------+");
        }
    }
}
