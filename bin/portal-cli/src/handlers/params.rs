//! Launch parameter scaffolding.

use std::fs;

use anyhow::{Context, Result};
use portal_params::prelude::PortalParams;

use crate::cli::InitParamsArgs;

pub(crate) fn handle_init_params(args: InitParamsArgs) -> Result<()> {
    let params = build_params(&args)?;
    let encoded = toml::to_string_pretty(&params).context("params must encode to TOML")?;

    fs::write(&args.output, encoded)
        .with_context(|| format!("must be able to write {}", args.output.display()))?;
    println!("Wrote launch params to {}", args.output.display());

    Ok(())
}

fn build_params(args: &InitParamsArgs) -> Result<PortalParams> {
    let validators = args
        .validators
        .iter()
        .map(|raw| {
            raw.parse()
                .with_context(|| format!("invalid validator public key: {raw}"))
        })
        .collect::<Result<Vec<_>>>()?;

    let params = PortalParams::new(validators, args.threshold);
    params.validate().context("params failed validation")?;

    Ok(params)
}

#[cfg(test)]
mod tests {
    use portal_bls::SecretKey;
    use rand::{rngs::StdRng, SeedableRng};

    use super::*;

    fn args(dir: &std::path::Path) -> InitParamsArgs {
        let mut rng = StdRng::seed_from_u64(3);
        let validators = (0..4)
            .map(|_| SecretKey::generate(&mut rng).public_key().to_string())
            .collect();

        InitParamsArgs {
            validators,
            threshold: 3,
            output: dir.join("portal.toml"),
        }
    }

    #[test]
    fn init_writes_a_valid_roundtrippable_file() {
        let dir = tempfile::tempdir().unwrap();
        let args = args(dir.path());

        handle_init_params(args.clone()).unwrap();

        let raw = fs::read_to_string(dir.path().join("portal.toml")).unwrap();
        let decoded: PortalParams = toml::from_str(&raw).unwrap();
        assert_eq!(decoded.threshold, 3);
        assert_eq!(decoded.validators.len(), 4);
        assert!(decoded.validate().is_ok());
    }

    #[test]
    fn bad_keys_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let mut args = args(dir.path());
        args.validators[0] = "not-hex".to_string();

        assert!(build_params(&args).is_err());
    }
}
