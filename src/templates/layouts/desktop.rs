use maud::{html, Markup, PreEscaped, DOCTYPE};

const STYLE: &str = r#"
body { margin: 0; font-family: system-ui, sans-serif; background: #0e1117; color: #fafafa; }
header { display: flex; align-items: center; gap: 12px; padding: 12px 24px; border-bottom: 1px solid #262730; }
.shell { display: flex; min-height: calc(100vh - 58px); }
aside { width: 300px; padding: 24px; background: #262730; box-sizing: border-box; }
aside label { display: block; margin: 16px 0 6px; font-size: 0.9em; }
aside select { width: 100%; padding: 8px; font-size: 15px; }
main { flex: 1; padding: 24px 40px; }
.card { background: #1a1c24; border-radius: 8px; padding: 16px; margin-top: 16px; }
.info { background: #1c3a5e; padding: 12px; border-radius: 6px; margin-top: 24px; font-size: 0.9em; }
.muted { color: #9ca3af; font-size: 0.85em; }
a { color: #60a5fa; }
"#;

pub fn desktop_layout(title: &str, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) }
                style { (PreEscaped(STYLE)) }
                script src="https://unpkg.com/htmx.org@1.9.12" defer {}
            }
            body {
              header {
                  svg
                      xmlns="http://www.w3.org/2000/svg"
                      width="24"
                      height="24"
                      viewBox="0 0 24 24"
                      fill="none"
                      stroke="#524ed2"
                      stroke-width="2"
                      stroke-linecap="round"
                      stroke-linejoin="round"
                      class="icon icon-tabler icon-tabler-home"
                  {
                      path stroke="none" d="M0 0h24v24H0z" fill="none" {}
                      path d="M5 12l-2 0l9 -9l9 9l-2 0" {}
                      path d="M5 12v7a2 2 0 0 0 2 2h10a2 2 0 0 0 2 -2v-7" {}
                      path d="M9 21v-6a2 2 0 0 1 2 -2h2a2 2 0 0 1 2 2v6" {}
                  }
                  h3 { (title) }
              }
                (content)
            }
        }
    }
}
