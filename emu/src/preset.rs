//! Initial RAM contents loaded from YAML, e.g. `{0: 256, 1: 300, 400: -1}`.

use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::BufReader;

use crate::{error::Error, model::State};

#[derive(Debug, Default, Deserialize)]
#[serde(transparent)]
pub struct Preset(BTreeMap<u16, i32>);

impl Preset {
    pub fn load(fname: &str) -> Result<Self, Error> {
        let reader = File::open(fname)
            .map(BufReader::new)
            .map_err(|e| Error::FileOpen(fname.to_string(), e))?;
        serde_yaml::from_reader(reader).map_err(|e| Error::Config(fname.to_string(), e))
    }

    pub fn parse(text: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(text)
    }

    /// Values are stored modulo 2^16, so negatives become two's complement.
    pub fn apply(&self, state: &mut State) {
        for (&addr, &val) in &self.0 {
            state.set(addr, val as u16);
        }
    }
}
