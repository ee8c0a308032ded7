//! Inline HTML status page. Polls `/readyz` client-side and renders the
//! per-member roles alongside the cluster verdict.

use crate::router::PageConfig;

pub const STATUS_PAGE_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="UTF-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<title>__TITLE__</title>
<style>
  :root {
    --bg: #101014; --panel: #1a1a21; --border: #2c2c35;
    --text: #e4e4e8; --muted: #71717a;
    --ok: #4caf50; --warn: #e6a23c; --err: #e53935;
    --font: ui-monospace, 'Cascadia Mono', 'Courier New', monospace;
  }
  * { box-sizing: border-box; margin: 0; padding: 0; }
  body { background: var(--bg); color: var(--text); font-family: var(--font); font-size: 14px; }

  header {
    display: flex; align-items: center; gap: 14px;
    padding: 14px 22px; border-bottom: 1px solid var(--border);
    background: var(--panel);
  }
  header img { height: 28px; }
  header h1 { font-size: 17px; letter-spacing: 1px; }

  .verdict {
    margin-left: auto; padding: 4px 12px; border-radius: 4px;
    border: 1px solid var(--border); font-weight: bold;
  }
  .verdict.ok { color: var(--ok); border-color: var(--ok); }
  .verdict.bad { color: var(--err); border-color: var(--err); }

  main { padding: 22px; }
  table { border-collapse: collapse; width: 100%; max-width: 760px; }
  th, td { text-align: left; padding: 8px 14px; border-bottom: 1px solid var(--border); }
  th { color: var(--muted); font-weight: normal; }

  .role-LEADER { color: var(--ok); }
  .role-FOLLOWER, .role-CANDIDATE { color: var(--text); }
  .role-NOT_READY { color: var(--warn); }
  .role-ERROR, .role-UNREACHABLE { color: var(--err); }
  .health-ok { color: var(--ok); }
  .health-bad { color: var(--err); }

  footer { padding: 10px 22px; color: var(--muted); font-size: 12px; }
</style>
</head>
<body>
<header>
  <img id="logo" src="__LOGO__" alt="" hidden>
  <h1>__TITLE__</h1>
  <span id="verdict" class="verdict">&hellip;</span>
</header>
<main>
  <table>
    <thead>
      <tr><th>member</th><th>role</th><th>committed</th><th>queued</th><th>health</th></tr>
    </thead>
    <tbody id="members"></tbody>
  </table>
</main>
<footer id="updated"></footer>
<script>
  const logo = document.getElementById('logo');
  if (logo.getAttribute('src')) logo.hidden = false;

  async function refresh() {
    let report;
    try {
      const response = await fetch('/readyz');
      report = await response.json();
    } catch (e) {
      document.getElementById('verdict').textContent = 'UNAVAILABLE';
      document.getElementById('verdict').className = 'verdict bad';
      return;
    }

    const verdict = document.getElementById('verdict');
    verdict.textContent = report.cluster_status;
    verdict.className = 'verdict ' + (report.cluster_health ? 'ok' : 'bad');

    const rows = Object.entries(report.nodes_health_check).map(([id, node]) => {
      const status = node.node_status;
      const health = node.node_health;
      const healthText = health.ok ? 'ok' : (health.resource_error || 'unhealthy');
      return '<tr>'
        + '<td>' + id + '</td>'
        + '<td class="role-' + status.state + '">' + status.state + '</td>'
        + '<td>' + status.committed_index + '</td>'
        + '<td>' + status.queued_writes + '</td>'
        + '<td class="health-' + (health.ok ? 'ok' : 'bad') + '">' + healthText + '</td>'
        + '</tr>';
    });
    document.getElementById('members').innerHTML = rows.join('');
    document.getElementById('updated').textContent = 'updated ' + new Date().toISOString();
  }

  refresh();
  setInterval(refresh, 5000);
</script>
</body>
</html>
"#;

/// Renders the status page with the configured branding.
pub fn render_status_page(page: &PageConfig) -> String {
    STATUS_PAGE_HTML
        .replace("__TITLE__", &page.title)
        .replace("__LOGO__", &page.logo)
}
