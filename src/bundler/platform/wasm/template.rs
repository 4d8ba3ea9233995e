//! Web page template for WebAssembly bundles.

/// Handlebars template for `index.html`.
///
/// `loader` names a JavaScript module exporting an `init` function (as
/// generated by wasm-bindgen); without it the module is instantiated
/// directly.
pub const INDEX_HTML_TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>{{name}}</title>
  <link rel="icon" type="image/png" href="icon.png">
  <style>
    html, body { margin: 0; height: 100%; overflow: hidden; background: #1e1e1e; }
    canvas { display: block; width: 100%; height: 100%; }
  </style>
</head>
<body>
{{#if loader}}
  <script type="module">
    import init from "./{{loader}}";
    init("./{{module}}").catch((err) => console.error("failed to start {{name}}:", err));
  </script>
{{else}}
  <script>
    WebAssembly.instantiateStreaming(fetch("./{{module}}"), {})
      .then(({ instance }) => {
        if (typeof instance.exports.main === "function") {
          instance.exports.main();
        }
      })
      .catch((err) => console.error("failed to start {{name}}:", err));
  </script>
{{/if}}
</body>
</html>
"#;
