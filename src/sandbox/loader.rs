// ABOUTME: Skill loader - turns raw skill source into a CompiledSkill.
// ABOUTME: The default NodeLoader runs skills in a restricted node vm harness.

use std::process::Stdio;

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;

use super::Capabilities;
use crate::catalog;
use crate::error::SandboxError;

/// A skill whose source has been checked and bound to an entry point.
#[async_trait]
pub trait CompiledSkill: Send + Sync {
    /// Run the skill's entry function with the given argument bag.
    async fn invoke(
        &self,
        args: &serde_json::Value,
        caps: &Capabilities,
    ) -> Result<serde_json::Value, SandboxError>;
}

/// Turns skill source text into a [`CompiledSkill`].
///
/// Compilation is where "this skill is broken" surfaces: a missing
/// entry function or an empty body fails here, before any execution
/// deadline starts counting.
pub trait SkillLoader: Send + Sync {
    fn compile(&self, source: &str) -> Result<Box<dyn CompiledSkill>, SandboxError>;
}

/// Default loader: executes skills in a `node` child process.
///
/// The skill body is evaluated inside a `vm` context created by a fixed
/// harness script. Every binding the skill sees (the capability facade,
/// the argument bag, the module shim) is created inside that context's
/// realm; host values cross the boundary only as JSON strings, so the
/// skill never holds an object whose constructor chain reaches the host
/// realm's `Function`.
pub struct NodeLoader {
    binary: String,
}

impl NodeLoader {
    pub fn new() -> Self {
        Self {
            binary: "node".to_string(),
        }
    }

    /// Use a specific runtime binary instead of `node` from PATH.
    pub fn with_binary(binary: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
        }
    }
}

impl Default for NodeLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl SkillLoader for NodeLoader {
    fn compile(&self, source: &str) -> Result<Box<dyn CompiledSkill>, SandboxError> {
        // The metadata block is documentation, not code.
        let body = catalog::strip_meta(source);
        if body.trim().is_empty() {
            return Err(SandboxError::Compile("skill body is empty".to_string()));
        }
        if !catalog::declares_entry(&body) {
            return Err(SandboxError::Compile(
                "skill does not define a run() entry function".to_string(),
            ));
        }
        Ok(Box::new(NodeSkill {
            binary: self.binary.clone(),
            body,
        }))
    }
}

struct NodeSkill {
    binary: String,
    body: String,
}

#[async_trait]
impl CompiledSkill for NodeSkill {
    async fn invoke(
        &self,
        args: &serde_json::Value,
        caps: &Capabilities,
    ) -> Result<serde_json::Value, SandboxError> {
        let dir = tempfile::tempdir()?;
        let skill_path = dir.path().join("skill.js");
        let harness_path = dir.path().join("harness.js");
        tokio::fs::write(&skill_path, &self.body).await?;
        tokio::fs::write(&harness_path, HARNESS).await?;

        let mut cmd = tokio::process::Command::new(&self.binary);
        cmd.arg(&harness_path)
            .arg(&skill_path)
            .arg(caps.fs_root())
            .arg(if caps.network_allowed() { "net" } else { "no-net" })
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            // The engine's timeout race drops this future; the child
            // must die with it.
            .kill_on_drop(true);

        let mut child = cmd.spawn().map_err(|e| {
            SandboxError::Runner(format!("failed to spawn {}: {e}", self.binary))
        })?;

        if let Some(mut stdin) = child.stdin.take() {
            let payload = serde_json::to_string(args)
                .map_err(|e| SandboxError::Serialize(e.to_string()))?;
            stdin.write_all(payload.as_bytes()).await?;
            stdin.shutdown().await?;
        }

        let output = child.wait_with_output().await?;
        let stdout = String::from_utf8_lossy(&output.stdout);

        for line in stdout.lines() {
            if let Some(rest) = line.strip_prefix("SKILL_OK:") {
                return serde_json::from_str(rest)
                    .map_err(|e| SandboxError::Serialize(format!("invalid result payload: {e}")));
            }
            if let Some(rest) = line.strip_prefix("SKILL_COMPILE_ERROR:") {
                return Err(SandboxError::Compile(rest.to_string()));
            }
            if let Some(rest) = line.strip_prefix("SKILL_RUNTIME_ERROR:") {
                return Err(SandboxError::Runtime(rest.to_string()));
            }
            if let Some(rest) = line.strip_prefix("SKILL_SERIALIZE_ERROR:") {
                return Err(SandboxError::Serialize(rest.to_string()));
            }
        }

        let stderr = String::from_utf8_lossy(&output.stderr);
        Err(SandboxError::Runner(format!(
            "sandbox produced no result marker (stderr: {})",
            stderr.trim()
        )))
    }
}

/// Harness executed by the runtime binary. Evaluates the skill body in a
/// vm context holding only the allowlisted bindings, locates the entry
/// function, and reports exactly one marker-tagged line on stdout.
///
/// Capability calls are marshaled: only JSON strings cross between the
/// host realm and the skill's context realm, in both directions. Results
/// and errors are re-materialized inside the context, so the skill never
/// touches a host-realm object.
const HARNESS: &str = r#"'use strict';
const vm = require('node:vm');
const fs = require('node:fs');
const path = require('node:path');

const [skillPath, fsRoot, netFlag] = process.argv.slice(2);
const oneline = (msg) => String(msg).replace(/\s*\n\s*/g, ' ');
const report = (marker, payload) => {
  process.stdout.write(marker + payload + '\n');
};

let args = {};
try {
  const raw = fs.readFileSync(0, 'utf8');
  if (raw.trim() !== '') args = JSON.parse(raw);
} catch (err) {
  report('SKILL_RUNTIME_ERROR:', 'invalid argument payload: ' + oneline(err.message));
  process.exit(1);
}

const root = path.resolve(fsRoot);
function guard(p) {
  const resolved = path.resolve(root, String(p));
  if (resolved !== root && !resolved.startsWith(root + path.sep)) {
    throw new Error('path escapes the sandbox root: ' + p);
  }
  return resolved;
}

// Host half of the capability facade. Never exposed to the skill
// directly: hostCall returns a JSON envelope string, so neither results
// nor thrown errors carry a host-realm object across the boundary.
function dispatch(op, argv) {
  switch (op) {
    case 'fs.read':
      return fs.readFileSync(guard(argv[0]), 'utf8');
    case 'fs.stat': {
      const s = fs.statSync(guard(argv[0]));
      return { size: s.size, file: s.isFile(), dir: s.isDirectory(), modifiedMs: s.mtimeMs };
    }
    case 'fs.list':
      return fs.readdirSync(guard(argv[0]));
    case 'path.join':
      return path.join(...argv.map(String));
    case 'path.resolve':
      return guard(argv[0]);
    default:
      throw new Error('unknown capability: ' + op);
  }
}
const hostCall = (op, argv) => {
  try {
    return JSON.stringify({ ok: dispatch(op, argv) });
  } catch (err) {
    return JSON.stringify({ err: oneline(err && err.message ? err.message : err) });
  }
};
const hostFetch = (url, optsJson, resolve, reject) => {
  fetch(url, JSON.parse(optsJson) || undefined)
    .then((r) => r.text())
    .then(resolve, (err) => reject(oneline(err && err.message ? err.message : err)));
};

const context = vm.createContext(Object.create(null));
// The bootstrap runs inside the context: every object it creates (args,
// caps, module) belongs to the skill's realm. The host functions it
// closes over are unreachable through property chains.
const bootstrap = vm.runInContext(`(hostCall, hostFetch, argsJson, allowNet) => {
  const call = (op, ...argv) => {
    const r = JSON.parse(hostCall(op, argv));
    if (r.err !== undefined) throw new Error(r.err);
    return r.ok;
  };
  globalThis.args = JSON.parse(argsJson);
  globalThis.module = { exports: {} };
  globalThis.exports = globalThis.module.exports;
  const caps = {
    fs: {
      read: (p) => call('fs.read', String(p)),
      stat: (p) => call('fs.stat', String(p)),
      list: (p) => call('fs.list', String(p)),
    },
    path: {
      join: (...parts) => call('path.join', ...parts.map(String)),
      resolve: (p) => call('path.resolve', String(p)),
    },
  };
  if (allowNet) {
    caps.fetch = (url, opts) => new Promise((resolve, reject) => {
      hostFetch(String(url), JSON.stringify(opts === undefined ? null : opts),
        resolve, (msg) => reject(new Error(msg)));
    });
  }
  globalThis.caps = caps;
}`, context);
bootstrap(hostCall, hostFetch, JSON.stringify(args), netFlag === 'net');

let script;
try {
  script = new vm.Script(fs.readFileSync(skillPath, 'utf8'), { filename: 'skill.js' });
} catch (err) {
  report('SKILL_COMPILE_ERROR:', oneline(err.message));
  process.exit(1);
}

(async () => {
  let value;
  try {
    script.runInContext(context);
    const moduleExports = context.module && context.module.exports;
    let entry = context.run;
    if (typeof entry !== 'function' && moduleExports && typeof moduleExports.run === 'function') {
      entry = moduleExports.run;
    }
    if (typeof entry !== 'function' && typeof moduleExports === 'function') {
      entry = moduleExports;
    }
    if (typeof entry !== 'function' && moduleExports && typeof moduleExports.default === 'function') {
      entry = moduleExports.default;
    }
    if (typeof entry !== 'function') {
      report('SKILL_COMPILE_ERROR:', 'skill does not export a run() entry function');
      process.exit(1);
    }
    value = await entry(context.args);
  } catch (err) {
    report('SKILL_RUNTIME_ERROR:', oneline(err && err.message ? err.message : err));
    process.exit(1);
  }
  let encoded;
  try {
    encoded = JSON.stringify(value === undefined ? null : value);
  } catch (err) {
    report('SKILL_SERIALIZE_ERROR:', oneline(err.message));
    process.exit(1);
  }
  if (encoded === undefined) {
    report('SKILL_SERIALIZE_ERROR:', 'result is not JSON-serializable');
    process.exit(1);
  }
  report('SKILL_OK:', encoded);
})();
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compile_rejects_missing_entry() {
        let loader = NodeLoader::new();
        let err = loader
            .compile("const x = 1; function main() { return x; }")
            .map(|_| ())
            .unwrap_err();
        assert!(matches!(err, SandboxError::Compile(_)));
        assert!(err.to_string().contains("run()"));
    }

    #[test]
    fn test_compile_rejects_empty_body() {
        let loader = NodeLoader::new();
        let source = "/* ==skill==\n{\"name\":\"x\",\"description\":\"y\"}\n==end-skill== */\n";
        assert!(matches!(
            loader.compile(source),
            Err(SandboxError::Compile(_))
        ));
    }

    #[test]
    fn test_compile_strips_metadata() {
        // A run() declared only inside the metadata block does not count.
        let source = "/* ==skill==\n{\"name\":\"x\",\"description\":\"function run()\"}\n==end-skill== */\nfunction main() {}";
        let loader = NodeLoader::new();
        assert!(loader.compile(source).is_err());
    }

    #[test]
    fn test_compile_accepts_entry_variants() {
        let loader = NodeLoader::new();
        assert!(loader.compile("function run(args) { return 1; }").is_ok());
        assert!(loader.compile("const run = (args) => 1;").is_ok());
        assert!(loader.compile("exports.run = (args) => 1;").is_ok());
    }
}
