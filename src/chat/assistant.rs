//! Local demo assistant
//!
//! Maps each [`Intent`] to an [`IntentHandler`]. The handlers produce canned
//! replies from the static float catalog; there is no model behind them.

use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;

use super::error::{ChatError, ChatResult};
use super::intent::{classify, Intent};
use crate::floats::{ChartData, ChartKind, Coordinate, FloatCatalog, RankedFloat};

/// Reply produced by the local assistant
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct AssistantReply {
    pub intent: Intent,
    pub text: String,
    /// Ranked floats for the map panel
    #[serde(skip_serializing_if = "Option::is_none")]
    pub floats: Option<Vec<RankedFloat>>,
    /// Chart data for the temperature panel
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chart: Option<ChartData>,
}

impl AssistantReply {
    pub fn text(intent: Intent, text: impl Into<String>) -> Self {
        Self {
            intent,
            text: text.into(),
            floats: None,
            chart: None,
        }
    }
}

/// Inputs shared by every handler
pub struct HandlerContext<'a> {
    pub catalog: &'a FloatCatalog,
    pub reference: Coordinate,
    pub nearest_limit: usize,
}

/// Produces the reply for one intent
pub trait IntentHandler: Send + Sync {
    fn handle(&self, message: &str, ctx: &HandlerContext<'_>) -> ChatResult<AssistantReply>;
}

/// Lists the closest floats to the reference point
pub struct NearestFloatsHandler;

impl IntentHandler for NearestFloatsHandler {
    fn handle(&self, _message: &str, ctx: &HandlerContext<'_>) -> ChatResult<AssistantReply> {
        let ranked = ctx.catalog.nearest(ctx.reference, ctx.nearest_limit)?;

        let mut text = format!(
            "Here are the {} nearest floats to your location:",
            ranked.len()
        );
        for (i, r) in ranked.iter().enumerate() {
            text.push_str(&format!(
                "\n{}. {} ({}): {:.1} km away, {:.1}°C",
                i + 1,
                r.float.name,
                r.float.id,
                r.distance_km,
                r.float.temperature
            ));
        }

        Ok(AssistantReply {
            intent: Intent::NearestFloats,
            text,
            floats: Some(ranked),
            chart: None,
        })
    }
}

/// Builds the monthly temperature chart for every float
pub struct TemperatureGraphHandler;

impl IntentHandler for TemperatureGraphHandler {
    fn handle(&self, message: &str, ctx: &HandlerContext<'_>) -> ChatResult<AssistantReply> {
        let kind = ChartKind::detect(message);
        let chart = ChartData::monthly_temperatures(ctx.catalog.floats(), kind);

        let text = format!(
            "Here is the monthly temperature trend for {} floats. \
             The chart is shown in the temperature panel.",
            chart.datasets.len()
        );

        Ok(AssistantReply {
            intent: Intent::TemperatureGraph,
            text,
            floats: None,
            chart: Some(chart),
        })
    }
}

/// Fallback for unrecognised messages
pub struct HelpHandler;

pub const HELP_TEXT: &str = "I can help you find the nearest ocean floats or show temperature graphs. \
Try asking \"Show me nearest floats\" or \"Show temperature graph\".";

impl IntentHandler for HelpHandler {
    fn handle(&self, _message: &str, _ctx: &HandlerContext<'_>) -> ChatResult<AssistantReply> {
        Ok(AssistantReply::text(Intent::Help, HELP_TEXT))
    }
}

/// Intent dispatcher over the float catalog
pub struct LocalAssistant {
    catalog: Arc<FloatCatalog>,
    reference: Coordinate,
    nearest_limit: usize,
    handlers: HashMap<Intent, Box<dyn IntentHandler>>,
}

impl LocalAssistant {
    /// Create an assistant with the default handler for every intent
    pub fn new(catalog: Arc<FloatCatalog>, reference: Coordinate, nearest_limit: usize) -> Self {
        let mut handlers: HashMap<Intent, Box<dyn IntentHandler>> = HashMap::new();
        handlers.insert(Intent::NearestFloats, Box::new(NearestFloatsHandler));
        handlers.insert(Intent::TemperatureGraph, Box::new(TemperatureGraphHandler));
        handlers.insert(Intent::Help, Box::new(HelpHandler));

        Self {
            catalog,
            reference,
            nearest_limit,
            handlers,
        }
    }

    /// Replace the handler for an intent
    pub fn with_handler(mut self, intent: Intent, handler: impl IntentHandler + 'static) -> Self {
        self.handlers.insert(intent, Box::new(handler));
        self
    }

    pub fn catalog(&self) -> &FloatCatalog {
        &self.catalog
    }

    pub fn reference(&self) -> Coordinate {
        self.reference
    }

    /// Classify a message and run the matching handler
    pub fn respond(&self, message: &str) -> ChatResult<AssistantReply> {
        if message.trim().is_empty() {
            return Err(ChatError::EmptyMessage);
        }

        let intent = classify(message);
        let handler = self
            .handlers
            .get(&intent)
            .ok_or(ChatError::NoHandler(intent))?;

        let ctx = HandlerContext {
            catalog: &self.catalog,
            reference: self.reference,
            nearest_limit: self.nearest_limit,
        };

        tracing::debug!(intent = %intent, "Dispatching local chat message");
        handler.handle(message, &ctx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::floats::{DEFAULT_NEAREST_LIMIT, REFERENCE_POINT};

    fn assistant() -> LocalAssistant {
        LocalAssistant::new(
            Arc::new(FloatCatalog::builtin()),
            REFERENCE_POINT,
            DEFAULT_NEAREST_LIMIT,
        )
    }

    #[test]
    fn test_nearest_floats_reply() {
        let reply = assistant().respond("Show me nearest floats").unwrap();

        assert_eq!(reply.intent, Intent::NearestFloats);
        let floats = reply.floats.unwrap();
        assert_eq!(floats.len(), 3);
        assert_eq!(floats[0].float.id, "2902755");
        assert!(reply.text.starts_with("Here are the 3 nearest floats"));
        assert!(reply.text.contains("1. Bay of Bengal Float (2902755): 1201.8 km away, 29.1°C"));
        assert!(reply.chart.is_none());
    }

    #[test]
    fn test_temperature_graph_reply() {
        let reply = assistant().respond("show temp graph").unwrap();

        assert_eq!(reply.intent, Intent::TemperatureGraph);
        let chart = reply.chart.unwrap();
        assert_eq!(chart.kind, ChartKind::Bar);
        assert_eq!(chart.datasets.len(), 3);
        assert!(reply.floats.is_none());
    }

    #[test]
    fn test_help_reply() {
        let reply = assistant().respond("xyz").unwrap();
        assert_eq!(reply, AssistantReply::text(Intent::Help, HELP_TEXT));
    }

    #[test]
    fn test_blank_message_rejected() {
        assert_eq!(assistant().respond("   "), Err(ChatError::EmptyMessage));
    }

    #[test]
    fn test_custom_handler_replaces_default() {
        struct Canned;
        impl IntentHandler for Canned {
            fn handle(&self, _: &str, _: &HandlerContext<'_>) -> ChatResult<AssistantReply> {
                Ok(AssistantReply::text(Intent::Help, "canned"))
            }
        }

        let assistant = assistant().with_handler(Intent::Help, Canned);
        assert_eq!(assistant.respond("xyz").unwrap().text, "canned");
        // Other intents keep their default handlers
        assert_eq!(
            assistant.respond("nearest").unwrap().intent,
            Intent::NearestFloats
        );
    }

    #[test]
    fn test_invalid_reference_surfaces_geo_error() {
        let assistant = LocalAssistant::new(
            Arc::new(FloatCatalog::builtin()),
            Coordinate::new_unchecked(95.0, 0.0),
            3,
        );
        assert!(matches!(
            assistant.respond("nearest floats"),
            Err(ChatError::Geo(_))
        ));
    }
}
