//! Stylesheet compiled into the binary and served at `/style.css`.

pub const STYLE_CSS: &str = r#":root {
  --bg: #0d1117;
  --surface: #161b22;
  --border: #30363d;
  --text: #e6edf3;
  --text-muted: #8b949e;
  --accent: #58a6ff;
  --green: #3fb950;
  --yellow: #d29922;
  --orange: #db6d28;
  --red: #f85149;
  --purple: #bc8cff;
  --radius: 8px;
  --font: -apple-system, BlinkMacSystemFont, 'Segoe UI', Helvetica, Arial, sans-serif;
  --mono: 'SF Mono', 'Cascadia Code', 'Fira Code', monospace;
}

* { margin: 0; padding: 0; box-sizing: border-box; }
body {
  background: var(--bg);
  color: var(--text);
  font-family: var(--font);
  font-size: 14px;
  line-height: 1.5;
}
a { color: var(--accent); text-decoration: none; }
a:hover { text-decoration: underline; }

.app { max-width: 1200px; margin: 0 auto; padding: 24px; }

header {
  display: flex;
  align-items: center;
  justify-content: space-between;
  margin-bottom: 24px;
  padding-bottom: 16px;
  border-bottom: 1px solid var(--border);
}
header h1 { font-size: 22px; font-weight: 600; }
header h1 .logo { color: var(--accent); font-family: var(--mono); font-weight: 700; }

nav { display: flex; gap: 4px; }
nav a {
  padding: 8px 16px;
  border-radius: 6px;
  color: var(--text-muted);
  font-weight: 500;
}
nav a:hover { color: var(--text); background: rgba(255,255,255,0.04); text-decoration: none; }
nav a.active { background: var(--accent); color: #fff; }

/* Notices */
.notice {
  padding: 10px 14px;
  border-radius: var(--radius);
  margin-bottom: 16px;
  border: 1px solid var(--border);
}
.notice.success { border-color: var(--green); color: var(--green); }
.notice.error { border-color: var(--red); color: var(--red); }

/* Cards */
.card {
  background: var(--surface);
  border: 1px solid var(--border);
  border-radius: var(--radius);
  padding: 20px;
  margin-bottom: 16px;
}
.card h2 { font-size: 16px; font-weight: 600; margin-bottom: 12px; }
.card h3 { font-size: 14px; font-weight: 600; margin-bottom: 8px; color: var(--text-muted); }
.page-head { display: flex; justify-content: space-between; align-items: center; margin-bottom: 16px; }
.page-head h2 { font-size: 20px; }
.muted { color: var(--text-muted); }
.prose { white-space: pre-wrap; }

/* Dashboard */
.stats-grid {
  display: grid;
  grid-template-columns: repeat(auto-fit, minmax(200px, 1fr));
  gap: 16px;
  margin-bottom: 24px;
}
.stat-card {
  display: block;
  background: var(--surface);
  border: 1px solid var(--border);
  border-radius: var(--radius);
  padding: 20px;
  text-align: center;
}
.stat-card:hover { border-color: var(--accent); text-decoration: none; }
.stat-card .value {
  font-size: 32px;
  font-weight: 700;
  font-family: var(--mono);
  color: var(--accent);
  line-height: 1.1;
}
.stat-card .label {
  font-size: 12px;
  color: var(--text-muted);
  margin-top: 6px;
  text-transform: uppercase;
  letter-spacing: 0.5px;
}

/* Badges */
.badge {
  display: inline-flex;
  padding: 2px 10px;
  border-radius: 12px;
  font-size: 12px;
  font-weight: 500;
  border: 1px solid var(--border);
}
.badge.status-open { border-color: var(--accent); color: var(--accent); }
.badge.status-in-progress { border-color: var(--yellow); color: var(--yellow); }
.badge.status-resolved { border-color: var(--green); color: var(--green); }
.badge.status-closed { color: var(--text-muted); }
.badge.priority-low { color: var(--text-muted); }
.badge.priority-medium { border-color: var(--yellow); color: var(--yellow); }
.badge.priority-high { border-color: var(--orange); color: var(--orange); }
.badge.priority-critical { border-color: var(--red); color: var(--red); }

/* Filters */
.filters { display: flex; flex-wrap: wrap; gap: 8px; align-items: center; margin-bottom: 12px; }
.mode-toggle { display: flex; gap: 4px; }
.summary { color: var(--text-muted); font-size: 12px; margin-bottom: 12px; }

/* Tables */
table { width: 100%; border-collapse: collapse; font-size: 13px; }
th, td { text-align: left; padding: 8px 12px; border-bottom: 1px solid var(--border); }
th {
  color: var(--text-muted);
  font-weight: 500;
  font-size: 12px;
  text-transform: uppercase;
  letter-spacing: 0.5px;
}
td.mono { font-family: var(--mono); font-size: 12px; }
tr:hover { background: rgba(255,255,255,0.02); }
.actions { display: flex; gap: 6px; align-items: center; }
.actions form { display: inline; }

/* Card grid */
.bug-grid { display: grid; grid-template-columns: repeat(auto-fill, minmax(280px, 1fr)); gap: 16px; }
.bug-card .meta { display: flex; gap: 6px; margin: 8px 0; }

/* Forms */
.field { display: flex; flex-direction: column; gap: 4px; margin-bottom: 14px; }
.field label { font-size: 13px; color: var(--text-muted); }
.row { display: grid; grid-template-columns: repeat(auto-fit, minmax(180px, 1fr)); gap: 12px; }
input[type="text"], input[type="search"], textarea, select {
  background: var(--bg);
  border: 1px solid var(--border);
  border-radius: 6px;
  color: var(--text);
  padding: 6px 10px;
  font-size: 13px;
  font-family: var(--font);
}
textarea { min-height: 120px; resize: vertical; }
input:focus, textarea:focus, select:focus { outline: none; border-color: var(--accent); }

/* Buttons */
.btn {
  display: inline-flex;
  align-items: center;
  gap: 6px;
  padding: 8px 16px;
  border: 1px solid var(--border);
  border-radius: 6px;
  background: var(--surface);
  color: var(--text);
  font-size: 13px;
  cursor: pointer;
}
.btn:hover { border-color: var(--accent); color: var(--accent); text-decoration: none; }
.btn:disabled { opacity: 0.5; cursor: wait; }
.btn.small { padding: 4px 10px; font-size: 12px; }
.btn.primary { background: var(--accent); color: #fff; border-color: var(--accent); }
.btn.primary:hover { opacity: 0.85; }
.btn.danger { border-color: var(--red); color: var(--red); }
.btn.danger:hover { background: var(--red); color: #fff; }
.btn.active { border-color: var(--accent); color: var(--accent); }

/* AI panel */
.ai-panel { border-color: var(--purple); }
.ai-panel h2 { color: var(--purple); }
.ai-section { margin-bottom: 14px; }
.ai-compare { display: flex; gap: 10px; align-items: center; margin-bottom: 14px; }

.empty { text-align: center; padding: 40px; color: var(--text-muted); }
footer { margin-top: 32px; color: var(--text-muted); font-size: 12px; text-align: center; }
"#;
