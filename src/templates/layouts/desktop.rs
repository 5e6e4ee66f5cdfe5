use maud::{html, Markup, DOCTYPE};

/// Page chrome. `signed_in_as` is the proxy-supplied email, if any.
pub fn desktop_layout(title: &str, signed_in_as: Option<&str>, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) }
                link rel="icon" href="/static/favicon/favicon.ico";
                link rel="stylesheet" href="/static/main.css";
            }
            body {
              header class="flex items-center justify-between px-6 py-3 shadow" {
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
                      class="icon icon-tabler icon-tabler-building"
                  {
                      path stroke="none" d="M0 0h24v24H0z" fill="none" {}
                      path d="M3 21l18 0" {}
                      path d="M9 8l1 0" {}
                      path d="M9 12l1 0" {}
                      path d="M9 16l1 0" {}
                      path d="M14 8l1 0" {}
                      path d="M14 12l1 0" {}
                      path d="M14 16l1 0" {}
                      path d="M5 21v-16a2 2 0 0 1 2 -2h10a2 2 0 0 1 2 2v16" {}
                  }
                  h3 { "Apartment Sales" }
                  nav {
                      ul {
                          li { a href="/" { "Apartments" } }
                      }
                  }
                  @if let Some(email) = signed_in_as {
                      span class="text-sm text-gray-600" { "Signed in as " strong { (email) } }
                  }
              }
                (content)
            }
        }
    }
}
