//! HTML templates for the web interface.
//!
//! Pages are plain format!-string templates; everything user-supplied goes
//! through `html_escape` before interpolation.

use crate::models::{AssetDisplay, AssetStatus, User};
use crate::utils::html_escape;

/// Base HTML template shared by all pages.
pub fn base_template(title: &str, content: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{} - assetman</title>
    <link rel="stylesheet" href="/static/style.css">
</head>
<body>
    <header id="main-header">
        <nav>
            <a href="/" class="logo">assetman</a>
            <a href="/assets/new">add asset</a>
            <a href="/users">users</a>
        </nav>
    </header>
    <main>
        <h1>{}</h1>
        {}
    </main>
    <script src="/static/app.js"></script>
</body>
</html>"#,
        html_escape(title),
        html_escape(title),
        content
    )
}

/// Render the index page hosting the asset-listing controller.
///
/// The controller in app.js reads the listing URL from the hidden
/// `#assetsUrl` element and fetches it once on load.
pub fn index_page() -> String {
    let content = r#"
    <input type="hidden" id="assetsUrl" value="/api/assets">
    <div id="assets-app">
        <div id="assets-loading">Loading assets...</div>
        <div id="assets-error" style="display: none">Failed to load assets.</div>
        <table id="assets-table" class="listing" style="display: none">
            <thead>
                <tr>
                    <th>Name</th>
                    <th>Type</th>
                    <th>Code</th>
                    <th>Status</th>
                    <th>Due back</th>
                </tr>
            </thead>
            <tbody id="assets-body"></tbody>
        </table>
    </div>
    "#;

    base_template("Assets", content)
}

/// Render the asset detail page with assignment controls.
pub fn asset_detail_page(
    asset: &AssetDisplay,
    assignee_name: Option<&str>,
    adder_name: Option<&str>,
    users: &[User],
) -> String {
    let assignee = match assignee_name {
        Some(name) => html_escape(name),
        None => "-".to_string(),
    };
    let adder = match adder_name {
        Some(name) => html_escape(name),
        None => "-".to_string(),
    };

    let return_date = asset.return_date.as_deref().unwrap_or("-");
    let due_note = if asset.overdue {
        r#" <span class="status lost">overdue</span>"#
    } else if asset.due_soon {
        r#" <span class="status assigned">due soon</span>"#
    } else {
        ""
    };

    let mut detail = format!(
        r#"
    <dl class="detail">
        <dt>Status</dt><dd><span class="status {}">{}</span></dd>
        <dt>Type</dt><dd>{}</dd>
        <dt>Description</dt><dd>{}</dd>
        <dt>Serial number</dt><dd>{}</dd>
        <dt>Code</dt><dd>{}</dd>
        <dt>Purchased</dt><dd>{}</dd>
        <dt>Added by</dt><dd>{}</dd>
        <dt>Assigned to</dt><dd>{}</dd>
        <dt>Due back</dt><dd>{}{}</dd>
    </dl>
    "#,
        asset.status.as_str(),
        asset.status.as_str(),
        html_escape(&asset.asset_type),
        html_escape(&asset.description),
        html_escape(&asset.serial_no),
        html_escape(&asset.code),
        html_escape(asset.purchased.as_deref().unwrap_or("-")),
        adder,
        assignee,
        html_escape(return_date),
        due_note,
    );

    if asset.assigned_to.is_some() {
        detail.push_str(&format!(
            r#"
    <form class="inline" method="post" action="/assets/{}/reclaim">
        <button type="submit">Reclaim</button>
    </form>
    "#,
            html_escape(&asset.id)
        ));
    } else {
        let mut options = String::new();
        for user in users {
            options.push_str(&format!(
                r#"<option value="{}">{}</option>"#,
                html_escape(&user.id),
                html_escape(&user.name)
            ));
        }

        detail.push_str(&format!(
            r#"
    <h2>Assign</h2>
    <form class="stacked" method="post" action="/assets/{}/assign">
        <label for="user_id">User</label>
        <select id="user_id" name="user_id">{}</select>
        <label for="return_date">Return date</label>
        <input type="date" id="return_date" name="return_date">
        <input type="submit" value="Assign">
    </form>
    "#,
            html_escape(&asset.id),
            options
        ));
    }

    detail.push_str(&format!(
        r#"
    <form class="inline" method="post" action="/assets/{}/lost">
        <input type="hidden" name="lost" value="{}">
        <button type="submit">{}</button>
    </form>
    "#,
        html_escape(&asset.id),
        asset.status != AssetStatus::Lost,
        if asset.status == AssetStatus::Lost {
            "Mark found"
        } else {
            "Mark lost"
        }
    ));

    base_template(&asset.name, &detail)
}

/// Submitted add-asset form values, re-rendered on a rejected submission.
#[derive(Debug, Default)]
pub struct AssetFormValues {
    pub name: String,
    pub asset_type: String,
    pub description: String,
    pub serial_no: String,
    pub code: String,
    pub purchased: String,
}

/// Render the add-asset form, prefilled with any previous submission.
pub fn asset_form_page(error: Option<&str>, values: &AssetFormValues) -> String {
    let error_box = match error {
        Some(msg) => format!(r#"<div class="error-box">{}</div>"#, html_escape(msg)),
        None => String::new(),
    };

    let content = format!(
        r#"
    {}
    <form class="stacked" method="post" action="/assets">
        <label for="name">Name</label>
        <input type="text" id="name" name="name" value="{}" required>
        <label for="asset_type">Type</label>
        <input type="text" id="asset_type" name="asset_type" value="{}" required>
        <label for="description">Description</label>
        <textarea id="description" name="description" rows="3">{}</textarea>
        <label for="serial_no">Serial number</label>
        <input type="text" id="serial_no" name="serial_no" value="{}" required>
        <label for="code">Organization code</label>
        <input type="text" id="code" name="code" value="{}" required>
        <label for="purchased">Date purchased</label>
        <input type="date" id="purchased" name="purchased" value="{}">
        <input type="submit" value="Add Asset">
    </form>
    "#,
        error_box,
        html_escape(&values.name),
        html_escape(&values.asset_type),
        html_escape(&values.description),
        html_escape(&values.serial_no),
        html_escape(&values.code),
        html_escape(&values.purchased),
    );

    base_template("Add asset", &content)
}

/// Render the user directory page.
pub fn users_page(rows: &[(User, u64)]) -> String {
    let mut body = String::new();
    for (user, assigned) in rows {
        body.push_str(&format!(
            r#"
        <tr>
            <td>{}</td>
            <td>{}</td>
            <td>{}</td>
        </tr>
        "#,
            html_escape(&user.name),
            html_escape(&user.email),
            assigned
        ));
    }

    let content = format!(
        r#"
    <p><a href="/users/new">Add user</a></p>
    <table class="listing">
        <thead>
            <tr><th>Name</th><th>Email</th><th>Assigned assets</th></tr>
        </thead>
        <tbody>{}</tbody>
    </table>
    "#,
        body
    );

    base_template("Users", &content)
}

/// Submitted add-user form values, re-rendered on a rejected submission.
#[derive(Debug, Default)]
pub struct UserFormValues {
    pub name: String,
    pub email: String,
}

/// Render the add-user form, prefilled with any previous submission.
pub fn user_form_page(error: Option<&str>, values: &UserFormValues) -> String {
    let error_box = match error {
        Some(msg) => format!(r#"<div class="error-box">{}</div>"#, html_escape(msg)),
        None => String::new(),
    };

    let content = format!(
        r#"
    {}
    <form class="stacked" method="post" action="/users">
        <label for="name">Name</label>
        <input type="text" id="name" name="name" value="{}" required>
        <label for="email">Email</label>
        <input type="email" id="email" name="email" value="{}" required>
        <input type="submit" value="Add User">
    </form>
    "#,
        error_box,
        html_escape(&values.name),
        html_escape(&values.email),
    );

    base_template("Add user", &content)
}

/// Render a generic error page.
pub fn error_page(message: &str) -> String {
    let content = format!(
        r#"<div class="error-box">{}</div><p><a href="/">Back to assets</a></p>"#,
        html_escape(message)
    );
    base_template("Error", &content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Asset;

    #[test]
    fn test_index_page_embeds_assets_url() {
        let html = index_page();
        assert!(html.contains(r#"id="assetsUrl" value="/api/assets""#));
        assert!(html.contains(r#"id="assets-app""#));
    }

    #[test]
    fn test_detail_page_escapes_user_data() {
        let mut asset = Asset::new(
            "<script>alert(1)</script>".to_string(),
            "laptop".to_string(),
            String::new(),
            "SN".to_string(),
            "CODE".to_string(),
            None,
            None,
        );
        asset.set_lost(false);

        let html = asset_detail_page(&asset.display(), None, None, &[]);
        assert!(!html.contains("<script>alert(1)</script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_detail_page_shows_adder() {
        let asset = Asset::new(
            "Monitor".to_string(),
            "display".to_string(),
            String::new(),
            "SN".to_string(),
            "CODE".to_string(),
            None,
            Some("user-1".to_string()),
        );

        let html = asset_detail_page(&asset.display(), None, Some("Grace"), &[]);
        assert!(html.contains("Added by"));
        assert!(html.contains("Grace"));
    }

    #[test]
    fn test_asset_form_keeps_submitted_values() {
        let values = AssetFormValues {
            name: "ThinkPad".to_string(),
            asset_type: "laptop".to_string(),
            description: "14 inch".to_string(),
            serial_no: "SN-1".to_string(),
            code: "ORG-1".to_string(),
            purchased: "2024-03-01".to_string(),
        };

        let html = asset_form_page(Some("An asset with this code already exists"), &values);
        assert!(html.contains(r#"value="ThinkPad""#));
        assert!(html.contains(r#"value="ORG-1""#));
        assert!(html.contains(r#"value="2024-03-01""#));
        assert!(html.contains(">14 inch</textarea>"));
        assert!(html.contains("already exists"));
    }
}
