//! # Page Rendering
//!
//! Server-side HTML for the debate page: input controls, chat bubbles, vote
//! widget and download link. Live turns are drawn by the page script from the
//! event stream using the same bubble markup.

use crate::core::escape_html;
use crate::features::debate::{Role, Transcript, MAX_ROUNDS, MIN_ROUNDS};
use crate::features::session::{DebatePhase, SessionState};

use super::vote::Vote;

pub const PAGE_TITLE: &str = "AI Debate Bot";

/// Visual treatment of one side's chat bubbles
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BubbleStyle {
    pub background: &'static str,
    pub alignment: &'static str,
    pub avatar: &'static str,
}

pub fn bubble_style(role: Role) -> BubbleStyle {
    match role {
        Role::Advocate => BubbleStyle {
            background: "#e0ffe0",
            alignment: "flex-start",
            avatar: "🟢🤖",
        },
        Role::Opponent => BubbleStyle {
            background: "#ffe0e0",
            alignment: "flex-end",
            avatar: "🔴🦊",
        },
    }
}

/// One side-aligned chat bubble
pub fn render_bubble(role: Role, text: &str) -> String {
    let style = bubble_style(role);
    format!(
        r#"<div class="chat-row" style="display: flex; justify-content: {align};"><div class="avatar">{avatar}</div><div class="chat-bubble" style="background-color:{bg};">{text}</div></div>"#,
        align = style.alignment,
        avatar = style.avatar,
        bg = style.background,
        text = escape_html(text),
    )
}

pub fn render_transcript(transcript: &Transcript) -> String {
    transcript
        .turns()
        .iter()
        .map(|t| render_bubble(t.role, t.argument.as_str()))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Radio buttons that submit on change, plus the acknowledgment once voted
pub fn render_vote(current: Option<Vote>) -> String {
    let mut html = String::from(
        r#"<form class="vote" method="post" action="/debate/vote"><fieldset><legend>🏁 Who won the debate?</legend>"#,
    );
    for vote in Vote::ALL {
        let checked = if current == Some(vote) { " checked" } else { "" };
        html.push_str(&format!(
            r#"<label><input type="radio" name="winner" value="{value}" onchange="this.form.submit()"{checked}> {label}</label>"#,
            value = vote.value(),
            label = vote.label(),
            checked = checked,
        ));
    }
    html.push_str("</fieldset></form>");

    if let Some(vote) = current {
        html.push_str(&format!(
            r#"<div class="success">{}</div>"#,
            escape_html(&vote.acknowledgment())
        ));
    }
    html
}

/// Full page for a session
pub fn render_page(state: &SessionState, stylesheet: &str) -> String {
    let topic = state.topic.as_str();
    let rounds = state.rounds.get();
    let start_disabled = if topic.trim().is_empty() { " disabled" } else { "" };

    let mut body = String::new();
    body.push_str("<h1>🧠 AI Debate Bot</h1>\n");
    body.push_str("<p>Enter a topic below and let two AI bots argue it out!</p>\n");
    body.push_str(&format!(
        r#"<form id="debate-form" onsubmit="return startDebate(event)">
<label for="topic">🎯 Debate Topic</label>
<input type="text" id="topic" name="topic" value="{topic}" required>
<label for="rounds">🌀 Number of Debate Rounds: <output id="rounds-value">{rounds}</output></label>
<input type="range" id="rounds" name="rounds" min="{min}" max="{max}" value="{rounds}">
<button type="submit" id="start"{disabled}>🗣️ Start Debate</button>
</form>
"#,
        topic = escape_html(topic),
        rounds = rounds,
        min = MIN_ROUNDS,
        max = MAX_ROUNDS,
        disabled = start_disabled,
    ));

    body.push_str(r#"<div id="live"></div>"#);
    body.push('\n');

    if let DebatePhase::Failed { message } = &state.phase {
        body.push_str(&format!(
            r#"<div class="error">⚠️ {}</div>"#,
            escape_html(message)
        ));
        body.push('\n');
    }

    // A reload while running has no stream attached; show what is recorded so far
    let running = state.phase == DebatePhase::Running;
    if running {
        body.push_str(
            r#"<div class="progress">⏳ Debate in progress. Reload to see new turns.</div>"#,
        );
        body.push('\n');
    }

    body.push_str(r#"<div id="chat-history">"#);
    if state.should_render_history() || running {
        body.push_str(&render_transcript(&state.transcript));
    }
    body.push_str("</div>\n");

    if state.started() {
        body.push_str(&render_vote(state.vote));
        body.push('\n');
        body.push_str(
            r#"<a class="download" href="/debate/export" download="debate.txt">📄 Download Debate (TXT)</a>"#,
        );
        body.push('\n');
    }

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title}</title>
<link rel="icon" href="data:image/svg+xml,<svg xmlns='http://www.w3.org/2000/svg' viewBox='0 0 100 100'><text y='.9em' font-size='90'>🤖</text></svg>">
<style>{stylesheet}</style>
</head>
<body>
<main>
{body}</main>
<script>{script}</script>
</body>
</html>
"#,
        title = PAGE_TITLE,
        stylesheet = stylesheet,
        body = body,
        script = PAGE_SCRIPT,
    )
}

/// Client side of the event stream. Mirrors `render_bubble` for live turns.
const PAGE_SCRIPT: &str = r#"
const STYLES = {
  advocate: { bg: '#e0ffe0', align: 'flex-start', avatar: '🟢🤖' },
  opponent: { bg: '#ffe0e0', align: 'flex-end', avatar: '🔴🦊' },
};
const topicInput = document.getElementById('topic');
const roundsInput = document.getElementById('rounds');
const startButton = document.getElementById('start');
const live = document.getElementById('live');
let bubble = null;

topicInput.addEventListener('input', () => {
  startButton.disabled = topicInput.value.trim() === '';
});
roundsInput.addEventListener('input', () => {
  document.getElementById('rounds-value').textContent = roundsInput.value;
});

function openBubble(role) {
  const s = STYLES[role];
  const row = document.createElement('div');
  row.className = 'chat-row';
  row.style.display = 'flex';
  row.style.justifyContent = s.align;
  const avatar = document.createElement('div');
  avatar.className = 'avatar';
  avatar.textContent = s.avatar;
  bubble = document.createElement('div');
  bubble.className = 'chat-bubble';
  bubble.style.backgroundColor = s.bg;
  row.appendChild(avatar);
  row.appendChild(bubble);
  live.appendChild(row);
}

function startDebate(event) {
  event.preventDefault();
  const topic = topicInput.value;
  if (topic.trim() === '') return false;
  startButton.disabled = true;
  live.innerHTML = '';
  const params = new URLSearchParams({ topic: topic, rounds: roundsInput.value });
  const source = new EventSource('/debate/stream?' + params.toString());
  source.onmessage = (msg) => {
    const ev = JSON.parse(msg.data);
    switch (ev.type) {
      case 'round_started': {
        const h = document.createElement('h3');
        h.textContent = '🔁 Round ' + ev.round;
        live.appendChild(h);
        break;
      }
      case 'turn_started':
        openBubble(ev.role);
        break;
      case 'partial':
      case 'turn_complete':
        if (bubble) bubble.textContent = ev.text;
        break;
      case 'complete':
      case 'failed':
      case 'already_started':
        source.close();
        window.location.reload();
        break;
    }
  };
  source.onerror = () => {
    source.close();
    window.location.reload();
  };
  return false;
}
"#;
