// src/web/page.rs — Server-rendered chat page (minijinja, HTML autoescape)

use minijinja::{context, Environment};
use serde::Serialize;

use super::markdown::render_markdown;
use crate::core::session::{Notice, Session, SessionPhase};
use crate::infra::errors::RetailChatError;
use crate::service::FetchParameters;

const PAGE_TEMPLATE_NAME: &str = "page.html";

const PAGE_TEMPLATE: &str = r#"<!doctype html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{{ title }}</title>
<style>
  body { margin: 0; font-family: system-ui, sans-serif; display: flex; min-height: 100vh; color: #262730; }
  aside { width: 18rem; padding: 1.5rem; background: #f0f2f6; box-sizing: border-box; }
  aside label { display: block; margin-top: 1rem; font-size: .875rem; }
  aside input { width: 100%; padding: .4rem; box-sizing: border-box; }
  aside button { margin-top: 1rem; padding: .4rem 1rem; }
  main { flex: 1; display: flex; flex-direction: column; padding: 1.5rem 3rem; max-width: 48rem; }
  .notice { padding: .75rem 1rem; border-radius: .5rem; margin-top: 1rem; }
  .notice.success { background: #dff5e3; color: #1b5e20; }
  .notice.error { background: #fde2e2; color: #8b1a1a; }
  #transcript { flex: 1; overflow-y: auto; }
  .turn { display: flex; gap: .75rem; padding: .5rem 0; }
  .turn .who { font-weight: 600; min-width: 4rem; }
  .turn.human { background: #f7f8fa; }
  form.chat { display: flex; gap: .5rem; position: sticky; bottom: 0; background: #fff; padding: 1rem 0; }
  form.chat input { flex: 1; padding: .6rem; }
</style>
</head>
<body>
<aside>
  <h3>Settings</h3>
  <p>{{ description }}</p>
  <form method="post" action="/fetch" onsubmit="document.getElementById('spinner').hidden = false; this.querySelector('button').disabled = true;">
    <label for="sbs">SBS</label>
    <input id="sbs" name="sbs" value="{{ settings.sbs }}">
    <label for="logged_user_id">Logged User ID</label>
    <input id="logged_user_id" name="logged_user_id" value="{{ settings.logged_user_id }}">
    <button type="submit">Fetch Data</button>
    <p id="spinner" hidden>Fetching data from service...</p>
  </form>
  {% if notice %}
  <div class="notice {{ notice.kind }}" role="status">{{ notice.text }}</div>
  {% endif %}
</aside>
<main>
  <h1>{{ title }}</h1>
  <section id="transcript" data-phase="{{ phase }}">
    {% for turn in turns %}
    <div class="turn {{ turn.speaker | lower }}">
      <div class="who">{{ turn.speaker }}</div>
      <div class="content">{{ turn.html | safe }}</div>
    </div>
    {% endfor %}
  </section>
  <form class="chat" method="post" action="/chat">
    <input name="message" placeholder="Type a message..." autocomplete="off" autofocus>
    <button type="submit">Send</button>
  </form>
</main>
<script>
  const t = document.getElementById('transcript');
  window.scrollTo(0, document.body.scrollHeight);
  t.scrollTop = t.scrollHeight;
</script>
</body>
</html>
"#;

pub const SIDEBAR_DESCRIPTION: &str = "This is a simple chat application using SOAP service. \
Connect to the service and start chatting.";

#[derive(Debug, Serialize)]
struct TurnView {
    speaker: &'static str,
    html: String,
}

pub struct PageRenderer {
    env: Environment<'static>,
    title: String,
}

impl PageRenderer {
    pub fn new(title: impl Into<String>) -> Result<Self, RetailChatError> {
        let mut env = Environment::new();
        env.add_template(PAGE_TEMPLATE_NAME, PAGE_TEMPLATE)?;
        Ok(Self {
            env,
            title: title.into(),
        })
    }

    pub fn render(
        &self,
        session: &Session,
        notice: Option<&Notice>,
    ) -> Result<String, RetailChatError> {
        let turns: Vec<TurnView> = session
            .history()
            .iter()
            .map(|turn| TurnView {
                speaker: turn.speaker().label(),
                html: render_markdown(turn.content()),
            })
            .collect();

        let settings: &FetchParameters = &session.settings;
        let phase = match session.phase() {
            SessionPhase::NoData => "no_data",
            SessionPhase::DataFetched => "data_fetched",
        };

        let template = self.env.get_template(PAGE_TEMPLATE_NAME)?;
        Ok(template.render(context! {
            title => &self.title,
            description => SIDEBAR_DESCRIPTION,
            settings => settings,
            notice => notice,
            phase => phase,
            turns => turns,
        })?)
    }
}
