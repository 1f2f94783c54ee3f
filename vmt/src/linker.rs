use crate::{
    codegen::{self, CodeGen, LabelCounter},
    error::Error,
    parser::Command,
};
use arch::source;
use tracing::{debug, info, trace};

/// One parsed `.vm` source. Its name prefixes the static cells.
#[derive(Debug)]
pub struct Module {
    pub name: String,
    commands: Vec<Line>,
}

#[derive(Debug)]
struct Line {
    no: usize,
    raw: String,
    cmd: Command,
}

impl Module {
    pub fn parse(name: &str, src: &str) -> Result<Module, Error> {
        let mut commands = Vec::new();
        for (no, raw, code) in source::lines(src) {
            let cmd = Command::parse(code).map_err(|e| e.at(name, no, raw))?;
            trace!("{}:{}: {}", name, no, cmd);
            commands.push(Line {
                no,
                raw: raw.to_string(),
                cmd,
            });
        }
        Ok(Module {
            name: name.to_string(),
            commands,
        })
    }
}

/// Collects modules and emits them as one program.
#[derive(Debug, Default)]
pub struct Translator {
    modules: Vec<Module>,
    entry: Option<String>,
}

impl Translator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses the module right away, so a bad module is rejected before anything is emitted.
    pub fn add_module(&mut self, name: &str, src: &str) -> Result<&mut Self, Error> {
        let module = Module::parse(name, src)?;
        debug!("Parsed {} commands from {}", module.commands.len(), name);
        self.modules.push(module);
        Ok(self)
    }

    /// Prepend the startup code calling `entry`.
    pub fn bootstrap(&mut self, entry: &str) -> &mut Self {
        self.entry = Some(entry.to_string());
        self
    }

    pub fn translate(&self) -> Result<Vec<String>, Error> {
        let mut labels = LabelCounter::new();
        let mut output = match &self.entry {
            Some(entry) => codegen::bootstrap(entry, &mut labels),
            None => Vec::new(),
        };

        for module in &self.modules {
            let mut code = CodeGen::new(&module.name, &mut labels);
            for line in &module.commands {
                code.gen(&line.cmd)
                    .map_err(|e| e.at(&module.name, line.no, &line.raw))?;
            }
            let (lines, statics) = code.finish();
            debug!("{}: {} lines, {} static slots", module.name, lines.len(), statics);
            output.extend(lines);
        }

        info!(
            "Translated {} modules into {} lines of assembly",
            self.modules.len(),
            output.len()
        );
        Ok(output)
    }
}

/// Translates a single module without bootstrap.
pub fn translate(name: &str, src: &str) -> Result<Vec<String>, Error> {
    let mut translator = Translator::new();
    translator.add_module(name, src)?;
    translator.translate()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn error_names_module_and_line() {
        let err = translate("Main", "push constant 1\n\n// note\npop constant 1\n").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Semantic);
        match err {
            Error::Line { module, no, raw, .. } => {
                assert_eq!(module, "Main");
                assert_eq!(no, 4);
                assert_eq!(raw, "pop constant 1");
            }
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn bootstrap_comes_first() {
        let mut translator = Translator::new();
        translator.add_module("Main", "push constant 1").unwrap();
        translator.bootstrap("Sys.init");
        let lines = translator.translate().unwrap();
        assert_eq!(lines[0], "// bootstrap");
        let main = lines.iter().position(|l| l == "// push constant 1").unwrap();
        let halt = lines.iter().position(|l| l == "(BOOTSTRAP.halt)").unwrap();
        assert!(halt < main);
    }

    #[test]
    fn translation_is_repeatable() {
        let mut translator = Translator::new();
        translator.add_module("Main", "eq\ncall f 0").unwrap();
        assert_eq!(translator.translate().unwrap(), translator.translate().unwrap());
    }
}
