use axum::{response::Html, routing::get, Router};

pub fn router() -> Router {
    Router::new().route("/", get(index))
}

async fn index() -> Html<&'static str> {
    Html(
        r#"<!doctype html>
<html lang="en">
<head>
  <meta charset="utf-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1" />
  <title>Research Scout</title>
  <style>
    body { font-family: Arial, sans-serif; margin: 2rem auto; max-width: 760px; color: #1d1d1f; }
    h1 { margin-bottom: 0.25rem; }
    .hint { color: #666; margin-top: 0; }
    .searchbar { display: flex; gap: 0.5rem; margin: 1.5rem 0; }
    input { flex: 1; padding: 0.6rem; font-size: 1rem; }
    button { padding: 0.6rem 1rem; }
    .card { border: 1px solid #ddd; padding: 1rem; border-radius: 8px; margin-bottom: 1rem; }
    .card a { color: #0366d6; word-break: break-all; }
    pre { white-space: pre-wrap; background: #f6f8fa; padding: 1rem; border-radius: 6px; }
    .error { color: #b00020; }
  </style>
</head>
<body>
  <h1>Research Scout</h1>
  <p class="hint">Search the web, read the sources, get bullet-point summaries.</p>

  <div class="searchbar">
    <input id="query" placeholder="What do you want to research?" />
    <button id="searchBtn">Search</button>
    <button id="exportBtn" disabled>Export PDF</button>
  </div>
  <div id="status"></div>
  <div id="results"></div>

  <script>
    const searchBtn = document.getElementById('searchBtn');
    const exportBtn = document.getElementById('exportBtn');
    const status = document.getElementById('status');
    const results = document.getElementById('results');
    let lastItems = [];
    let lastQuery = '';

    async function runSearch() {
      const query = document.getElementById('query').value.trim();
      if (!query) {
        status.textContent = 'Enter a query first.';
        return;
      }
      status.textContent = 'Searching and summarizing... this can take a minute.';
      results.innerHTML = '';
      exportBtn.disabled = true;
      try {
        const res = await fetch('/search', {
          method: 'POST',
          headers: { 'Content-Type': 'application/json' },
          body: JSON.stringify({ query }),
        });
        const json = await res.json();
        if (!res.ok) {
          status.innerHTML = '<span class="error">' + (json.error || 'Request failed.') + '</span>';
          return;
        }
        if (!json.length) {
          status.textContent = 'No results found. Try a different query.';
          return;
        }
        lastItems = json;
        lastQuery = query;
        status.textContent = json.length + ' source(s) summarized.';
        for (const item of json) {
          const card = document.createElement('div');
          card.className = 'card';
          const title = document.createElement('h3');
          title.textContent = item.title;
          const link = document.createElement('a');
          link.href = item.url;
          link.textContent = item.url;
          const summary = document.createElement('pre');
          summary.textContent = item.summary;
          card.append(title, link, summary);
          results.append(card);
        }
        exportBtn.disabled = false;
      } catch (err) {
        status.innerHTML = '<span class="error">' + err + '</span>';
      }
    }

    async function exportPdf() {
      const res = await fetch('/export', {
        method: 'POST',
        headers: { 'Content-Type': 'application/json' },
        body: JSON.stringify({ query: lastQuery, items: lastItems }),
      });
      if (!res.ok) {
        const json = await res.json();
        status.innerHTML = '<span class="error">' + (json.error || 'Export failed.') + '</span>';
        return;
      }
      const blob = await res.blob();
      const url = URL.createObjectURL(blob);
      const a = document.createElement('a');
      a.href = url;
      a.download = 'summary.pdf';
      a.click();
      URL.revokeObjectURL(url);
    }

    searchBtn.addEventListener('click', runSearch);
    exportBtn.addEventListener('click', exportPdf);
    document.getElementById('query').addEventListener('keydown', (e) => {
      if (e.key === 'Enter') runSearch();
    });
  </script>
</body>
</html>"#,
    )
}
