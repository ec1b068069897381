use fluent_bundle::{FluentArgs, FluentBundle, FluentResource};
use unic_langid::LanguageIdentifier;

/// Message catalogue for human-facing output.
///
/// Unknown codes render as the code itself, so a missing translation never
/// hides information.
pub struct Messages {
    bundle: FluentBundle<FluentResource>,
}

impl Messages {
    /// Built-in catalogue for the requested language tag. Unknown tags fall
    /// back to en-GB.
    pub fn builtin(lang: &str) -> Self {
        let (tag, src) = match lang {
            "en" | "en-GB" => ("en-GB", include_str!("../i18n/en-GB.ftl")),
            _ => ("en-GB", include_str!("../i18n/en-GB.ftl")),
        };
        let langid: LanguageIdentifier = tag.parse().expect("builtin language tag");
        let resource =
            FluentResource::try_new(src.to_owned()).expect("builtin FTL resource (en-GB.ftl)");
        let mut bundle = FluentBundle::new(vec![langid]);
        // Plain terminal output; no bidi isolation marks.
        bundle.set_use_isolating(false);
        bundle.add_resource(resource).expect("add builtin FTL resource");
        Self { bundle }
    }

    pub fn get(&self, code: &str) -> String {
        self.render(code, None)
    }

    pub fn format(&self, code: &str, args: &[(&str, String)]) -> String {
        let mut fa = FluentArgs::new();
        for (key, value) in args {
            fa.set(*key, value.clone());
        }
        self.render(code, Some(&fa))
    }

    fn render(&self, code: &str, args: Option<&FluentArgs>) -> String {
        let Some(message) = self.bundle.get_message(code) else {
            return code.to_string();
        };
        let Some(pattern) = message.value() else {
            return code.to_string();
        };
        let mut errors = vec![];
        let text = self.bundle.format_pattern(pattern, args, &mut errors).to_string();
        if errors.is_empty() {
            text
        } else {
            code.to_string()
        }
    }
}
