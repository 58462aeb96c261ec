//! The encode pipeline: validate, bootstrap the Namespace, compress, emit.

use crate::bootstrap::{
    FIRST_ALIASES, SECOND_ALIASES, THIRD_ALIASES, emit_aliases, emit_escape_letters,
    emit_global_functions, emit_radix_letters,
};
use crate::charset::{CharsetBuilder, emit_layer1, emit_layer2};
use crate::config::Config;
use crate::dictionary::{Dictionary, DictionaryEntry, emit_decoder, emit_dictionary};
use crate::emit::Emitter;
use crate::error::EncodeError;
use crate::namespace::Namespace;
use crate::oracle::{CoercionOracle, V8_ORACLE};
use crate::quote::Quoter;
use crate::stats::{Stats, utf16_len};

/// Result of one encode call.
#[derive(Debug, Clone)]
pub struct Encoded {
    /// The complete program.
    pub program: String,
    /// The final expression alone, which evaluates to the input text.
    pub expression: String,
    pub stats: Stats,
    pub dictionary: Vec<DictionaryEntry>,
}

/// Encodes text under one configuration and coercion oracle.
pub struct Encoder<'o> {
    config: Config,
    oracle: &'o dyn CoercionOracle,
}

impl Encoder<'static> {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            oracle: &V8_ORACLE,
        }
    }
}

impl<'o> Encoder<'o> {
    pub fn with_oracle(config: Config, oracle: &'o dyn CoercionOracle) -> Self {
        Self { config, oracle }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Encode `source`. Every call starts from a fresh Namespace.
    pub fn encode(&self, source: &str) -> Result<Encoded, EncodeError> {
        let config = &self.config;
        config.validate()?;

        let input_len = utf16_len(source);
        if input_len > config.max_input_len {
            return Err(EncodeError::InputTooLarge {
                len: input_len,
                max: config.max_input_len,
            });
        }

        let quoter = Quoter::new(&config.quote_style, config.weights, config.seed)?;
        let mut ns = Namespace::new(config.root.clone(), quoter);
        let root = config.root.as_str();
        let scratch = ns.scratch();
        let accessor = ns.accessor();

        let mut prelude = Vec::new();
        if config.strict_mode {
            let mut names = vec![root.to_string(), scratch.clone()];
            if config.accessor {
                names.push(accessor.clone());
            }
            prelude.push(format!("var {}", names.join(",")));
        }
        prelude.push(format!("{root}=~[]"));
        if config.accessor {
            prelude.push(format!("{accessor}=([{scratch}])=>{root}[{scratch}]"));
        }

        let charset = CharsetBuilder::new(self.oracle).build();
        tracing::debug!(
            engine = self.oracle.engine(),
            layer1 = charset.layer1.len(),
            layer2 = charset.layer2.len(),
            "built charset"
        );
        emit_layer1(&mut ns, &charset.layer1);
        emit_aliases(&mut ns, FIRST_ALIASES);
        emit_layer2(&mut ns, &charset.layer2);
        emit_aliases(&mut ns, SECOND_ALIASES);
        emit_global_functions(&mut ns);
        emit_escape_letters(&mut ns, self.oracle);
        emit_radix_letters(&mut ns, self.oracle);
        emit_aliases(&mut ns, THIRD_ALIASES);
        emit_decoder(&mut ns);

        let dictionary = Dictionary::build(source, &ns);
        emit_dictionary(&mut ns, &dictionary);

        let expression = Emitter::new(&mut ns, &dictionary).emit(source);
        tracing::debug!(len = expression.len(), "emitted expression");

        let run = config.run.then(|| format!("{}({scratch})", ns.member("=")));
        let mut statements = prelude;
        statements.extend(ns.into_statements());
        statements.push(format!("{scratch}={expression}"));
        statements.extend(run);
        let program = statements.join(";");

        let stats = Stats::new(input_len, utf16_len(&expression), utf16_len(&program));
        Ok(Encoded {
            program,
            expression,
            stats,
            dictionary: dictionary.entries().to_vec(),
        })
    }
}

/// Encode `source` with the built-in V8 oracle.
pub fn encode(source: &str, config: &Config) -> Result<Encoded, EncodeError> {
    Encoder::new(config.clone()).encode(source)
}
