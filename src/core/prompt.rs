// src/core/prompt.rs — Analyst prompt template (minijinja)

use minijinja::{Environment, UndefinedBehavior};
use serde::Serialize;

use crate::infra::errors::RetailChatError;
use crate::provider::Message;

const ANALYST_TEMPLATE_NAME: &str = "analyst";

const ANALYST_TEMPLATE: &str = "\
You are a data analyst. Based on the data provided, answer the user's query in a natural language.
<DATA>{{ formatted_data }}</DATA>
User question: {{ question }}";

/// Values bound to the template slots.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PromptInputs {
    pub formatted_data: String,
    pub question: String,
}

pub struct PromptTemplate {
    env: Environment<'static>,
    name: &'static str,
}

impl PromptTemplate {
    /// Strict template: an unbound slot is an error rather than an empty string.
    pub fn from_template(name: &'static str, source: &'static str) -> Result<Self, RetailChatError> {
        let mut env = Environment::new();
        env.set_undefined_behavior(UndefinedBehavior::Strict);
        env.add_template(name, source)?;
        Ok(Self { env, name })
    }

    pub fn analyst() -> Result<Self, RetailChatError> {
        Self::from_template(ANALYST_TEMPLATE_NAME, ANALYST_TEMPLATE)
    }

    pub fn render<S: Serialize>(&self, inputs: &S) -> Result<String, RetailChatError> {
        let template = self.env.get_template(self.name)?;
        Ok(template.render(inputs)?)
    }

    /// The rendered prompt as a single human message.
    pub fn format_messages<S: Serialize>(&self, inputs: &S) -> Result<Vec<Message>, RetailChatError> {
        Ok(vec![Message::user(self.render(inputs)?)])
    }
}
