//! The gateway's landing page: a single static form over the guidance API.

/// Minimal HTML client for trying the API from a browser.
pub fn index_html() -> &'static str {
    r#"<!doctype html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>Saarthi</title>
<style>
  body { font-family: Georgia, serif; max-width: 44rem; margin: 3rem auto; padding: 0 1rem; color: #2b2b2b; }
  h1 { font-weight: normal; }
  textarea { width: 100%; min-height: 6rem; font: inherit; padding: .5rem; }
  select, button { font: inherit; padding: .4rem .8rem; margin-top: .5rem; }
  .verse { border-left: 3px solid #b8860b; padding-left: 1rem; margin: 1rem 0; }
  .citation { color: #b8860b; }
  #guidance { white-space: pre-wrap; margin-top: 1.5rem; }
  .error { color: #a33; }
  footer { margin-top: 3rem; font-size: .85rem; color: #777; }
</style>
</head>
<body>
<h1>Saarthi</h1>
<p>Describe what weighs on you; Saarthi answers with counsel grounded in the Bhagavad Gita.</p>
<textarea id="problem" placeholder="I feel anxious about..."></textarea><br>
<select id="language">
  <option>English</option>
  <option>Hindi</option>
  <option>Sanskrit</option>
</select>
<button id="ask">Seek guidance</button>
<div id="verses"></div>
<div id="guidance"></div>
<footer>Saarthi offers spiritual reflection, not professional medical, legal, or financial advice.</footer>
<script>
const btn = document.getElementById('ask');
btn.addEventListener('click', async () => {
  const problem = document.getElementById('problem').value;
  if (!problem.trim()) return;
  btn.disabled = true;
  const guidanceEl = document.getElementById('guidance');
  const versesEl = document.getElementById('verses');
  guidanceEl.textContent = '…';
  versesEl.innerHTML = '';
  try {
    const res = await fetch('/api/guidance', {
      method: 'POST',
      headers: { 'Content-Type': 'application/json' },
      body: JSON.stringify({ problem, language: document.getElementById('language').value }),
    });
    const data = await res.json();
    if (!data.ok) throw new Error(data.error);
    for (const v of data.verses) {
      const div = document.createElement('div');
      div.className = 'verse';
      div.innerHTML = '<span class="citation">BG ' + v.chapter_number + '.' + v.verse_number +
        '</span><br>' + v.original_text + '<br><em>' + v.transliteration + '</em><br>' + v.translation;
      versesEl.appendChild(div);
    }
    guidanceEl.textContent = data.guidance;
  } catch (err) {
    guidanceEl.innerHTML = '<span class="error">' + err.message + '</span>';
  } finally {
    btn.disabled = false;
  }
});
</script>
</body>
</html>
"#
}
