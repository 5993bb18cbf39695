use axum::response::Html;

fn page(title: &str, body: &str) -> Html<String> {
    Html(format!(
        "<!doctype html><html><head><title>{title}</title></head>\
         <body><h1>{title}</h1>{body}</body></html>"
    ))
}

pub(crate) async fn index() -> Html<String> {
    page(
        "Home",
        r#"<a href="/about">About</a> | <a href="/dashboard">Dashboard</a> | <a href="/sign-in">Sign in</a>"#,
    )
}

pub(crate) async fn about() -> Html<String> {
    page("About", "<p>Anyone can read this page.</p>")
}

pub(crate) async fn contact() -> Html<String> {
    page("Contact", "<p>Anyone can read this page.</p>")
}

pub(crate) async fn sign_in() -> Html<String> {
    page(
        "Sign in",
        r#"<form id="sign-in">
<input name="email" type="email" placeholder="email">
<input name="password" type="password" placeholder="password">
<button>Sign in</button>
</form>
<pre id="result"></pre>
<script>
document.getElementById("sign-in").addEventListener("submit", async (e) => {
  e.preventDefault();
  const form = new FormData(e.target);
  const res = await fetch("/api/auth/sign-in/email", {
    method: "POST",
    headers: { "content-type": "application/json" },
    body: JSON.stringify(Object.fromEntries(form)),
  });
  if (res.ok) {
    const callback = new URLSearchParams(location.search).get("callbackUrl");
    location.href = callback || "/";
  } else {
    document.getElementById("result").textContent = await res.text();
  }
});
</script>"#,
    )
}

pub(crate) async fn forget_password() -> Html<String> {
    page("Forgot password", "<p>Password reset is handled by the provider.</p>")
}

pub(crate) async fn reset_password() -> Html<String> {
    page("Reset password", "<p>Password reset is handled by the provider.</p>")
}

pub(crate) async fn two_factor() -> Html<String> {
    page("Two-factor", "<p>Two-factor verification is handled by the provider.</p>")
}

pub(crate) async fn dashboard() -> Html<String> {
    page(
        "Dashboard",
        r#"<p>Only visible with a session cookie.</p>
<button onclick="fetch('/api/auth/sign-out',{method:'POST'}).then(()=>location.href='/')">Sign out</button>"#,
    )
}

pub(crate) async fn settings() -> Html<String> {
    page("Settings", "<p>Only visible with a session cookie.</p>")
}
