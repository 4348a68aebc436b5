use heck::{ToLowerCamelCase, ToSnakeCase};

/// Plurals that general English rules get wrong.
///
/// Table names derived from these are persisted in user databases, so entries
/// are never edited, only appended.
const IRREGULAR: &[(&str, &str)] = &[
    ("alumnus", "alumni"),
    ("analysis", "analyses"),
    ("appendix", "appendices"),
    ("axis", "axes"),
    ("cactus", "cacti"),
    ("child", "children"),
    ("crisis", "crises"),
    ("criterion", "criteria"),
    ("datum", "data"),
    ("die", "dice"),
    ("foot", "feet"),
    ("goose", "geese"),
    ("index", "indices"),
    ("leaf", "leaves"),
    ("life", "lives"),
    ("man", "men"),
    ("matrix", "matrices"),
    ("medium", "media"),
    ("mouse", "mice"),
    ("ox", "oxen"),
    ("person", "people"),
    ("quiz", "quizzes"),
    ("thesis", "theses"),
    ("tooth", "teeth"),
    ("vertex", "vertices"),
    ("wife", "wives"),
    ("woman", "women"),
];

/// Words whose plural is the word itself.
const UNCOUNTABLE: &[&str] = &[
    "deer",
    "equipment",
    "fish",
    "information",
    "metadata",
    "money",
    "news",
    "rice",
    "series",
    "sheep",
    "species",
];

/// `UpperCamelCase` → `snake_case`.
pub fn snake_case(src: &str) -> String {
    src.to_snake_case()
}

/// Go identifier for a proto name, following protoc-gen-go.
///
/// Underscores followed by a lowercase letter are dropped and the letter is
/// capitalized. A lowercase letter following a digit is also capitalized, so
/// `int32s` becomes `Int32S`.
pub fn go_camel_case(src: &str) -> String {
    let bytes = src.as_bytes();
    let mut out = String::with_capacity(src.len());
    let mut i = 0;

    while i < bytes.len() {
        let c = bytes[i];
        let next_is_lower = bytes.get(i + 1).is_some_and(u8::is_ascii_lowercase);

        match c {
            b'.' if next_is_lower => {}
            b'.' => out.push('_'),
            b'_' if i == 0 || bytes[i - 1] == b'.' => out.push('X'),
            b'_' if next_is_lower => {}
            c if c.is_ascii_digit() => out.push(c as char),
            c => {
                out.push(c.to_ascii_uppercase() as char);
                while bytes.get(i + 1).is_some_and(u8::is_ascii_lowercase) {
                    i += 1;
                    out.push(bytes[i] as char);
                }
            }
        }

        i += 1;
    }

    out
}

/// Default protobuf JSON name for a proto field name (`a_double` → `aDouble`).
pub fn json_camel_case(src: &str) -> String {
    if src.contains('_') {
        src.to_lower_camel_case()
    } else {
        src.to_string()
    }
}

/// `UpperCamelCase` → `lowerCamelCase`.
pub fn lower_camel_case(src: &str) -> String {
    src.to_lower_camel_case()
}

/// Plural of a `snake_case` name. Only the last word is pluralized, so
/// `belongs_to_thing` becomes `belongs_to_things`.
pub fn pluralize(src: &str) -> String {
    let (head, last) = match src.rsplit_once('_') {
        Some((head, last)) => (Some(head), last),
        None => (None, src),
    };

    let plural = pluralize_word(last);

    match head {
        Some(head) => format!("{head}_{plural}"),
        None => plural,
    }
}

/// Table name for a message name: snake case, last word pluralized.
pub fn table_name(message: &str) -> String {
    pluralize(&snake_case(message))
}

fn pluralize_word(word: &str) -> String {
    if word.is_empty() {
        return String::new();
    }

    let lower = word.to_ascii_lowercase();

    if UNCOUNTABLE.contains(&lower.as_str()) {
        return word.to_string();
    }

    if let Some((_, plural)) = IRREGULAR.iter().find(|(singular, _)| *singular == lower) {
        return plural.to_string();
    }

    pluralizer::pluralize(word, 2, false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn go_camel_case_matches_protoc_gen_go() {
        assert_eq!(go_camel_case("id"), "Id");
        assert_eq!(go_camel_case("created_at"), "CreatedAt");
        assert_eq!(go_camel_case("an_int32"), "AnInt32");
        assert_eq!(go_camel_case("int32s"), "Int32S");
        assert_eq!(go_camel_case("a_structpb"), "AStructpb");
        assert_eq!(go_camel_case("_private"), "XPrivate");
        assert_eq!(go_camel_case("Owner"), "Owner");
        assert_eq!(go_camel_case("owner_ID"), "Owner_ID");
    }

    #[test]
    fn json_camel_case_matches_protoc() {
        assert_eq!(json_camel_case("a_double"), "aDouble");
        assert_eq!(json_camel_case("created_at"), "createdAt");
        assert_eq!(json_camel_case("int32s"), "int32s");
    }

    #[test]
    fn lower_camel_case_of_go_names() {
        assert_eq!(lower_camel_case("OwnerId"), "ownerId");
        assert_eq!(lower_camel_case("BelongsToId"), "belongsToId");
    }

    #[test]
    fn snake_case_of_message_names() {
        assert_eq!(snake_case("User"), "user");
        assert_eq!(snake_case("BelongsToThing"), "belongs_to_thing");
        assert_eq!(snake_case("ManyToManyThing"), "many_to_many_thing");
    }

    #[test]
    fn irregular_plurals_use_the_fixed_table() {
        assert_eq!(pluralize("person"), "people");
        assert_eq!(pluralize("child"), "children");
        assert_eq!(pluralize("sales_person"), "sales_people");
        assert_eq!(pluralize("sheep"), "sheep");
        assert_eq!(pluralize("news"), "news");
    }

    #[test]
    fn regular_plurals() {
        assert_eq!(pluralize("thing"), "things");
        assert_eq!(pluralize("company"), "companies");
        assert_eq!(pluralize("address"), "addresses");
        assert_eq!(pluralize("belongs_to_thing"), "belongs_to_things");
    }

    #[test]
    fn table_names() {
        assert_eq!(table_name("User"), "users");
        assert_eq!(table_name("Company"), "companies");
        assert_eq!(table_name("Person"), "people");
        assert_eq!(table_name("HasManyThing"), "has_many_things");
    }
}
