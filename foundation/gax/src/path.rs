//! Resource name helpers shared by the `projects/...` style APIs.

use crate::error::Error;

pub fn project_path(project: &str) -> String {
    format!("projects/{project}")
}

pub fn organization_path(organization: &str) -> String {
    format!("organizations/{organization}")
}

/// Returns `name` as is when it already starts with `prefix/`, otherwise `prefix/name`.
pub fn ensure_prefixed(prefix: &str, name: &str) -> String {
    if name.starts_with(&format!("{prefix}/")) {
        name.to_string()
    } else {
        format!("{prefix}/{name}")
    }
}

/// Extracts the variables of a resource name following `template`,
/// e.g. `projects/{project}/dlpJobs/{dlp_job}`.
pub fn parse<'a>(template: &str, name: &'a str) -> Result<Vec<&'a str>, Error> {
    let segments: Vec<&str> = template.split('/').collect();
    let parts: Vec<&str> = name.split('/').collect();
    if segments.len() != parts.len() {
        return Err(Error::InvalidArgument(format!("{name} does not match {template}")));
    }
    let mut vars = vec![];
    for (segment, part) in segments.iter().zip(parts) {
        if segment.starts_with('{') && segment.ends_with('}') {
            if part.is_empty() {
                return Err(Error::InvalidArgument(format!("{name} has an empty {segment}")));
            }
            vars.push(part);
        } else if *segment != part {
            return Err(Error::InvalidArgument(format!("{name} does not match {template}")));
        }
    }
    Ok(vars)
}

#[cfg(test)]
mod test {
    use crate::path::{ensure_prefixed, parse, project_path};

    #[test]
    fn test_parse() {
        let vars = parse("projects/{project}/dlpJobs/{dlp_job}", "projects/p1/dlpJobs/i-123").unwrap();
        assert_eq!(vars, vec!["p1", "i-123"]);
        assert!(parse("projects/{project}/dlpJobs/{dlp_job}", "projects/p1/jobTriggers/t").is_err());
        assert!(parse("projects/{project}", "projects/").is_err());
        assert!(parse("projects/{project}", "projects/a/b").is_err());
    }

    #[test]
    fn test_prefix() {
        assert_eq!(project_path("p"), "projects/p");
        assert_eq!(ensure_prefixed("projects", "p"), "projects/p");
        assert_eq!(ensure_prefixed("projects", "projects/p"), "projects/p");
    }
}
