//! MCP (Model Context Protocol) server implementation.
//!
//! Exposes the phonetic analysis engine over the MCP protocol on stdio, so
//! editors and assistants can look up words, find rhymes and scan lines.
//!
//! # Architecture
//!
//! The MCP server is a presentation layer. It reads the process-wide
//! lexicon from [`versepad_core::lexicon::shared`] and returns the same
//! report types the CLI prints with `--json`. Tool methods never hold
//! mutable state, so concurrent requests need no coordination.

use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{CallToolResult, Content, Implementation, ServerCapabilities, ServerInfo};
use rmcp::schemars;
use rmcp::{ErrorData as McpError, ServerHandler, tool, tool_handler, tool_router};
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Serialize;

use versepad_core::config::{Config, rhyme_cap};
use versepad_core::lexicon::{self, Lexicon};
use versepad_core::phrases::PhraseSuggester;
use versepad_core::reports::{
    MeterReport, PhraseReport, RhymeKind, RhymeReport, WordReport,
};
use versepad_core::rhyme::RhymeIndex;
use versepad_core::{AnalysisResult, DEFAULT_MAX_INPUT_BYTES, scan};

/// Parameters for the `get_info` tool.
#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct GetInfoParams {
    /// Output format: "text" or "json"
    #[serde(default = "default_format")]
    pub format: String,
}

fn default_format() -> String {
    "text".to_string()
}

/// Parameters for the `lookup_word` tool.
#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct LookupWordParams {
    /// The word to look up.
    pub word: String,
}

/// Parameters for the `find_rhymes` tool.
#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct FindRhymesParams {
    /// The word to rhyme with.
    pub word: String,
    /// Rhyme kind: "perfect" (default), "near", or "multi".
    pub kind: Option<RhymeKind>,
    /// Maximum rhymes to return; 0 returns all.
    pub limit: Option<usize>,
}

/// Parameters for the `analyze_meter` tool.
#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct AnalyzeMeterParams {
    /// One line of verse.
    pub text: String,
}

/// Parameters for the `suggest_phrases` tool.
#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct SuggestPhrasesParams {
    /// The word to build phrases around.
    pub word: String,
    /// How many phrases to return.
    pub count: Option<usize>,
    /// Seed for reproducible suggestions.
    pub seed: Option<u64>,
}

/// Parameters for the `scan_poem` tool.
#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct ScanPoemParams {
    /// The full poem; blank lines separate stanzas.
    pub text: String,
}

/// Settings the server applies to every request.
#[derive(Debug, Clone)]
pub struct ServerOptions {
    /// Default number of rhymes returned by `find_rhymes`.
    pub rhyme_limit: usize,
    /// Default number of phrases returned by `suggest_phrases`.
    pub phrase_count: usize,
    /// Templates used by `suggest_phrases`.
    pub suggester: PhraseSuggester,
    /// Largest text accepted by a tool, or `None` for no limit.
    pub max_input_bytes: Option<usize>,
}

impl Default for ServerOptions {
    fn default() -> Self {
        Self {
            rhyme_limit: versepad_core::config::DEFAULT_RHYME_LIMIT,
            phrase_count: versepad_core::config::DEFAULT_PHRASE_COUNT,
            suggester: PhraseSuggester::default(),
            max_input_bytes: Some(DEFAULT_MAX_INPUT_BYTES),
        }
    }
}

impl ServerOptions {
    /// Derive server options from loaded configuration.
    ///
    /// # Errors
    ///
    /// Fails when configured phrase templates are invalid.
    pub fn from_config(config: &Config) -> AnalysisResult<Self> {
        Ok(Self {
            rhyme_limit: config.rhyme_limit(),
            phrase_count: config.phrase_count(),
            suggester: config.phrase_suggester()?,
            max_input_bytes: config.input_limit(),
        })
    }
}

/// MCP server exposing the phonetic analysis engine.
///
/// Each `#[tool]` method in the `#[tool_router]` impl block is automatically
/// registered and callable via the MCP protocol.
#[derive(Clone)]
pub struct ProjectServer {
    tool_router: rmcp::handler::server::router::tool::ToolRouter<Self>,
    lexicon: &'static Lexicon,
    index: &'static RhymeIndex<'static>,
    options: ServerOptions,
}

#[tool_router]
impl ProjectServer {
    /// Create a server over the shared lexicon.
    ///
    /// Blocks until [`lexicon::shared::init`] has completed.
    pub fn from_shared(options: ServerOptions) -> Self {
        Self {
            tool_router: Self::tool_router(),
            lexicon: lexicon::shared::get(),
            index: lexicon::shared::rhyme_index(),
            options,
        }
    }

    fn check_size(&self, text: &str) -> Result<(), McpError> {
        match self.options.max_input_bytes {
            Some(max) if text.len() > max => Err(McpError::invalid_params(
                format!("input too large: {} bytes (limit: {max} bytes)", text.len()),
                None,
            )),
            _ => Ok(()),
        }
    }

    /// Get server and dictionary information.
    #[tool(description = "Get server name, version, and pronunciation dictionary status")]
    #[tracing::instrument(skip(self), fields(otel.kind = "server"))]
    fn get_info(
        &self,
        Parameters(params): Parameters<GetInfoParams>,
    ) -> Result<CallToolResult, McpError> {
        tracing::debug!(tool = "get_info", format = %params.format, "executing MCP tool");

        let info = serde_json::json!({
            "name": env!("CARGO_PKG_NAME"),
            "version": env!("CARGO_PKG_VERSION"),
            "description": env!("CARGO_PKG_DESCRIPTION"),
            "dictionary": {
                "source": self.lexicon.source().to_string(),
                "availability": self.lexicon.availability(),
                "words": self.lexicon.dictionary().len(),
            },
        });

        let text = if params.format == "json" {
            serde_json::to_string_pretty(&info)
                .map_err(|e| McpError::internal_error(format!("serialization error: {e}"), None))?
        } else {
            let status = if self.lexicon.is_ready() {
                format!("{} words", self.lexicon.dictionary().len())
            } else {
                "unavailable".to_string()
            };
            format!(
                "{} v{}\ndictionary: {} ({status})",
                env!("CARGO_PKG_NAME"),
                env!("CARGO_PKG_VERSION"),
                self.lexicon.source(),
            )
        };

        tracing::info!(tool = "get_info", "MCP tool completed");
        Ok(CallToolResult::success(vec![Content::text(text)]))
    }

    /// Look up a word's pronunciation, syllables and stress.
    #[tool(description = "Look up a word: pronunciations, syllables, hyphenation, stress pattern and rhyme key")]
    #[tracing::instrument(skip(self, params), fields(otel.kind = "server", word = %params.word))]
    fn lookup_word(
        &self,
        Parameters(params): Parameters<LookupWordParams>,
    ) -> Result<CallToolResult, McpError> {
        self.check_size(&params.word)?;
        let report = WordReport::build(self.lexicon.dictionary(), &params.word);

        tracing::info!(tool = "lookup_word", known = report.known, "MCP tool completed");
        json_result(&report)
    }

    /// Find rhymes for a word.
    #[tool(description = "Find perfect, near, or multi-syllable rhymes for a word")]
    #[tracing::instrument(skip(self, params), fields(otel.kind = "server", word = %params.word))]
    fn find_rhymes(
        &self,
        Parameters(params): Parameters<FindRhymesParams>,
    ) -> Result<CallToolResult, McpError> {
        self.check_size(&params.word)?;
        let kind = params.kind.unwrap_or_default();
        let limit = rhyme_cap(params.limit.unwrap_or(self.options.rhyme_limit));
        let report = RhymeReport::build(self.index, &params.word, kind, limit);

        tracing::info!(
            tool = "find_rhymes",
            kind = kind.as_str(),
            total = report.total,
            "MCP tool completed"
        );
        json_result(&report)
    }

    /// Scan one line for stress and meter.
    #[tool(description = "Analyze the stress pattern and meter of one line of verse")]
    #[tracing::instrument(skip(self, params), fields(otel.kind = "server"))]
    fn analyze_meter(
        &self,
        Parameters(params): Parameters<AnalyzeMeterParams>,
    ) -> Result<CallToolResult, McpError> {
        self.check_size(&params.text)?;
        let report = MeterReport::build(self.lexicon.dictionary(), &params.text);

        tracing::info!(tool = "analyze_meter", meter = %report.meter, "MCP tool completed");
        json_result(&report)
    }

    /// Suggest rhyming phrases.
    #[tool(description = "Suggest short phrases pairing a word with its multi-syllable rhymes")]
    #[tracing::instrument(skip(self, params), fields(otel.kind = "server", word = %params.word))]
    fn suggest_phrases(
        &self,
        Parameters(params): Parameters<SuggestPhrasesParams>,
    ) -> Result<CallToolResult, McpError> {
        self.check_size(&params.word)?;
        let count = params.count.unwrap_or(self.options.phrase_count);
        let word = params.word.trim();
        let suggester = &self.options.suggester;
        let phrases = match params.seed {
            Some(seed) => suggester.suggest(self.index, word, count, &mut StdRng::seed_from_u64(seed)),
            None => suggester.suggest(self.index, word, count, &mut rand::rng()),
        };
        let report = PhraseReport {
            word: word.to_string(),
            phrases,
            seed: params.seed,
        };

        tracing::info!(
            tool = "suggest_phrases",
            returned = report.phrases.len(),
            "MCP tool completed"
        );
        json_result(&report)
    }

    /// Scan a whole poem line by line.
    #[tool(description = "Scan a poem: per-line syllables, stress and meter, plus the overall meter")]
    #[tracing::instrument(skip(self, params), fields(otel.kind = "server"))]
    fn scan_poem(
        &self,
        Parameters(params): Parameters<ScanPoemParams>,
    ) -> Result<CallToolResult, McpError> {
        self.check_size(&params.text)?;
        let report = scan::scan(self.lexicon, &params.text);

        tracing::info!(
            tool = "scan_poem",
            lines = report.line_count,
            "MCP tool completed"
        );
        json_result(&report)
    }
}

fn json_result<T: Serialize>(value: &T) -> Result<CallToolResult, McpError> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| McpError::internal_error(format!("serialization error: {e}"), None))?;
    Ok(CallToolResult::success(vec![Content::text(json)]))
}

#[tool_handler]
impl ServerHandler for ProjectServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: Default::default(),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: env!("CARGO_PKG_NAME").to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                ..Default::default()
            },
            instructions: Some(format!(
                "{} MCP server. Use tools to look up pronunciations, find rhymes, \
                 and scan verse for meter.",
                env!("CARGO_PKG_NAME"),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rmcp::model::RawContent;
    use versepad_core::lexicon::DictionarySource;

    fn server() -> ProjectServer {
        lexicon::shared::init(DictionarySource::Embedded).expect("embedded lexicon loads");
        ProjectServer::from_shared(ServerOptions::default())
    }

    /// Extract text from the first content item in a `CallToolResult`.
    fn extract_text(result: &CallToolResult) -> Option<&str> {
        result.content.first().and_then(|c| match &c.raw {
            RawContent::Text(t) => Some(t.text.as_str()),
            _ => None,
        })
    }

    fn extract_json(result: &CallToolResult) -> serde_json::Value {
        let text = extract_text(result).expect("should have text content");
        serde_json::from_str(text).expect("output should be valid JSON")
    }

    #[test]
    fn server_info_has_correct_name() {
        let server = server();
        let info = ServerHandler::get_info(&server);

        assert_eq!(info.server_info.name, env!("CARGO_PKG_NAME"));
        assert_eq!(info.server_info.version, env!("CARGO_PKG_VERSION"));
    }

    #[test]
    fn server_has_tools_capability() {
        let server = server();
        let info = ServerHandler::get_info(&server);

        assert!(info.capabilities.tools.is_some());
    }

    #[test]
    fn server_has_instructions() {
        let server = server();
        let info = ServerHandler::get_info(&server);

        let instructions = info.instructions.expect("server should have instructions");
        assert!(instructions.contains(env!("CARGO_PKG_NAME")));
    }

    #[test]
    fn get_info_tool_returns_text_by_default() {
        let server = server();
        let params = Parameters(GetInfoParams {
            format: "text".to_string(),
        });

        let result = server.get_info(params).expect("get_info should succeed");

        assert!(!result.is_error.unwrap_or(false));
        let text = extract_text(&result).expect("should have text content");
        assert!(text.contains(env!("CARGO_PKG_NAME")));
        assert!(text.contains("embedded"));
    }

    #[test]
    fn get_info_tool_reports_dictionary_as_json() {
        let server = server();
        let params = Parameters(GetInfoParams {
            format: "json".to_string(),
        });

        let result = server.get_info(params).expect("get_info should succeed");
        let json = extract_json(&result);

        assert_eq!(json["name"], env!("CARGO_PKG_NAME"));
        assert_eq!(json["dictionary"]["availability"]["state"], "ready");
        assert!(json["dictionary"]["words"].as_u64().unwrap() > 0);
    }

    #[test]
    fn lookup_word_tool_reports_syllables() {
        let server = server();
        let result = server
            .lookup_word(Parameters(LookupWordParams {
                word: "Dancing".to_string(),
            }))
            .expect("lookup_word should succeed");
        let json = extract_json(&result);

        assert_eq!(json["known"], true);
        assert_eq!(json["syllable_count"], 2);
    }

    #[test]
    fn find_rhymes_tool_defaults_to_perfect() {
        let server = server();
        let result = server
            .find_rhymes(Parameters(FindRhymesParams {
                word: "cat".to_string(),
                kind: None,
                limit: None,
            }))
            .expect("find_rhymes should succeed");
        let json = extract_json(&result);

        assert_eq!(json["kind"], "perfect");
        let rhymes: Vec<&str> = json["rhymes"]
            .as_array()
            .unwrap()
            .iter()
            .map(|v| v.as_str().unwrap())
            .collect();
        assert!(rhymes.contains(&"hat"));
        assert!(!rhymes.contains(&"cat"));
    }

    #[test]
    fn find_rhymes_tool_respects_limit() {
        let server = server();
        let result = server
            .find_rhymes(Parameters(FindRhymesParams {
                word: "cat".to_string(),
                kind: Some(RhymeKind::Perfect),
                limit: Some(2),
            }))
            .expect("find_rhymes should succeed");
        let json = extract_json(&result);

        assert_eq!(json["rhymes"].as_array().unwrap().len(), 2);
        assert_eq!(json["truncated"], true);
    }

    #[test]
    fn analyze_meter_tool_classifies_trochee() {
        let server = server();
        let result = server
            .analyze_meter(Parameters(AnalyzeMeterParams {
                text: "Silver river".to_string(),
            }))
            .expect("analyze_meter should succeed");
        let json = extract_json(&result);

        assert_eq!(json["meter"], "trochaic");
    }

    #[test]
    fn suggest_phrases_tool_is_reproducible_with_seed() {
        let server = server();
        let call = || {
            let result = server
                .suggest_phrases(Parameters(SuggestPhrasesParams {
                    word: "dancing".to_string(),
                    count: Some(3),
                    seed: Some(42),
                }))
                .expect("suggest_phrases should succeed");
            extract_json(&result)
        };

        let first = call();
        assert_eq!(first, call());
        assert_eq!(first["phrases"].as_array().unwrap().len(), 3);
    }

    #[test]
    fn scan_poem_tool_counts_stanzas() {
        let server = server();
        let result = server
            .scan_poem(Parameters(ScanPoemParams {
                text: "Silver river\n\nAway today\n".to_string(),
            }))
            .expect("scan_poem should succeed");
        let json = extract_json(&result);

        assert_eq!(json["stanza_count"], 2);
        assert_eq!(json["line_count"], 2);
    }

    #[test]
    fn oversized_input_is_rejected() {
        lexicon::shared::init(DictionarySource::Embedded).expect("embedded lexicon loads");
        let server = ProjectServer::from_shared(ServerOptions {
            max_input_bytes: Some(4),
            ..ServerOptions::default()
        });

        let result = server.analyze_meter(Parameters(AnalyzeMeterParams {
            text: "Silver river".to_string(),
        }));
        assert!(result.is_err());
    }
}
