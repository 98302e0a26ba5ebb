// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Default configuration values and `init` presets.

use super::schema::GkConfig;

/// Get the default configuration.
pub fn default_config() -> GkConfig {
    GkConfig::default()
}

/// Minimal configuration written by `gk init --preset minimal`.
pub fn minimal_config() -> &'static str {
    r#"# gitking configuration (minimal)
[ui]
locale = "en"
"#
}

/// Standard configuration written by `gk init --preset standard`.
pub fn standard_config() -> &'static str {
    r#"# gitking configuration (standard)
[search]
threshold = 0.4
max_results = 10

[ui]
locale = "en"
color = true
max_tags = 3

[store]
max_history_items = 10
"#
}

/// Generate an example configuration file with every option.
pub fn example_config() -> &'static str {
    r#"# gitking configuration file
# Author: Eshan Roy
# SPDX-License-Identifier: MIT

# Fuzzy search
[search]
# 0.0 = exact match only, 1.0 = match anything
threshold = 0.4
min_match_char_length = 2
max_results = 10
suggestion_limit = 5

[search.command_weights]
command = 0.4
description = 0.3
tags = 0.2
category = 0.1

[search.scenario_weights]
title = 0.4
description = 0.3
tags = 0.2
steps = 0.1

# Display
[ui]
locale = "en"
color = true
highlight_open = "<mark>"
highlight_close = "</mark>"
max_tags = 3

# Saved placeholder values and input history
[store]
# path = "~/.local/share/gitking/variables.json"
max_history_items = 10

# Extra commands and scenarios merged over the built-in catalog
[catalog]
# path = "my-commands.toml"
"#
}
