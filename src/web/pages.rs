//! HTML for the registration pages, rendered from minijinja templates.
//!
//! Template names end in `.html`, so minijinja escapes every interpolated
//! value.

use minijinja::{context, Environment};

use crate::domain::model::Participant;
use crate::utils::error::Result;

const BASE_TEMPLATE: &str = include_str!("templates/base.html");
const INDEX_TEMPLATE: &str = include_str!("templates/index.html");
const PARTICIPANTS_TEMPLATE: &str = include_str!("templates/participants.html");

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlashLevel {
    Success,
    Error,
}

impl FlashLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            FlashLevel::Success => "success",
            FlashLevel::Error => "error",
        }
    }

    pub fn parse(value: &str) -> Self {
        if value == "success" {
            FlashLevel::Success
        } else {
            FlashLevel::Error
        }
    }
}

/// Compiled page templates, shared by every request.
#[derive(Debug)]
pub struct Pages {
    env: Environment<'static>,
}

impl Pages {
    pub fn new() -> Result<Self> {
        let mut env = Environment::new();
        env.add_template("base.html", BASE_TEMPLATE)?;
        env.add_template("index.html", INDEX_TEMPLATE)?;
        env.add_template("participants.html", PARTICIPANTS_TEMPLATE)?;
        Ok(Self { env })
    }

    pub fn render_index(&self, flash: Option<(FlashLevel, &str)>) -> Result<String> {
        let flash = flash.map(|(level, message)| {
            context! {
                level => level.as_str(),
                message => message,
            }
        });
        let template = self.env.get_template("index.html")?;
        Ok(template.render(context! { flash => flash })?)
    }

    pub fn render_participants(
        &self,
        participants: &[Participant],
        error: Option<&str>,
    ) -> Result<String> {
        let template = self.env.get_template("participants.html")?;
        Ok(template.render(context! {
            participants => participants,
            error => error,
        })?)
    }
}
