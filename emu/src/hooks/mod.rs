pub mod dump;

use crate::model::State;
use arch::inst::Inst;

pub trait Hook {
    fn init(&mut self, state: State) -> State;
    fn exec(&mut self, time: u64, addr: u16, inst: Inst, state: State) -> State;
    fn exit(&mut self, _state: &State) {}
}
