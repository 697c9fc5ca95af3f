use ordermap::OrderMap;

use crate::{
    colors::Color,
    deck::Deck,
    segment::{Chrome, Segment, Snippet},
    style::StyleTag,
};

const K: StyleTag = StyleTag::Keyword;
const F: StyleTag = StyleTag::Function;
const C: StyleTag = StyleTag::Class;
const A: StyleTag = StyleTag::Param;
const S: StyleTag = StyleTag::String;
const N: StyleTag = StyleTag::Number;
const O: StyleTag = StyleTag::Operator;
const P: StyleTag = StyleTag::Plain;

// id, label, language, icon, icon color, segments
type Stock = (
    &'static str,
    &'static str,
    &'static str,
    &'static str,
    Color,
    &'static [(&'static str, StyleTag)],
);

const PYTHON: &[(&str, StyleTag)] = &[
    ("import", K),
    (" requests", P),
    ("\n", P),
    ("from", K),
    (" bs4 ", P),
    ("import", K),
    (" BeautifulSoup", C),
    ("\n\n", P),
    ("def", K),
    (" scrape_website", F),
    ("(", P),
    ("url", A),
    ("):\n    ", P),
    ("response", P),
    (" = ", O),
    ("requests", P),
    (".", O),
    ("get", F),
    ("(", P),
    ("url", A),
    (")\n    ", P),
    ("soup", P),
    (" = ", O),
    ("BeautifulSoup", C),
    ("(", P),
    ("response", P),
    (".", O),
    ("text", P),
    (")\n    ", P),
    ("return", K),
    (" soup", P),
    (".", O),
    ("find_all", F),
    ("(", P),
    ("\"article\"", S),
    (")", P),
];

const JAVASCRIPT: &[(&str, StyleTag)] = &[
    ("async", K),
    (" ", P),
    ("function", K),
    (" fetchUsers", F),
    ("() {\n  ", P),
    ("try", K),
    (" {\n    ", P),
    ("const", K),
    (" response = ", P),
    ("await", K),
    (" ", P),
    ("fetch", F),
    ("(", P),
    ("'/api/users'", S),
    (");\n    ", P),
    ("const", K),
    (" data = ", P),
    ("await", K),
    (" response", P),
    (".", O),
    ("json", F),
    ("();\n    ", P),
    ("return", K),
    (" data", P),
    (".", O),
    ("map", F),
    ("(", P),
    ("user", A),
    (" ", P),
    ("=>", O),
    (" ({\n      id: user", P),
    (".", O),
    ("id,\n      name: user", P),
    (".", O),
    ("name\n    }));\n  } ", P),
    ("catch", K),
    (" (error) {\n    ", P),
    ("console", P),
    (".", O),
    ("error", F),
    ("(", P),
    ("'Failed to fetch'", S),
    (", error);\n  }\n}", P),
];

const ANGULAR: &[(&str, StyleTag)] = &[
    ("import", K),
    (" { Component, ", P),
    ("OnInit", C),
    (" } ", P),
    ("from", K),
    (" ", P),
    ("'@angular/core'", S),
    (";\n\n@", P),
    ("Component", C),
    ("({\n  ", P),
    ("selector", A),
    (": ", O),
    ("'app-root'", S),
    (",\n  ", P),
    ("templateUrl", A),
    (": ", O),
    ("'./app.component.html'", S),
    ("\n})\n", P),
    ("export", K),
    (" ", P),
    ("class", K),
    (" AppComponent ", C),
    ("implements", K),
    (" OnInit {\n  ", P),
    ("title", A),
    (": ", O),
    ("string", C),
    (" = ", O),
    ("'Szybkie Kursiki'", S),
    (";\n  ", P),
    ("users", A),
    (": ", O),
    ("any", C),
    ("[] = [];\n\n  ", P),
    ("ngOnInit", F),
    ("(): ", P),
    ("void", C),
    (" {\n    ", P),
    ("this", K),
    (".", O),
    ("loadUsers", F),
    ("();\n  }\n}", P),
];

const TYPESCRIPT: &[(&str, StyleTag)] = &[
    ("interface", K),
    (" User {\n  ", P),
    ("id", A),
    (": ", O),
    ("number", C),
    (";\n  ", P),
    ("name", A),
    (": ", O),
    ("string", C),
    (";\n  ", P),
    ("email", A),
    (": ", O),
    ("string", C),
    (";\n  ", P),
    ("role", A),
    (": ", O),
    ("\"admin\"", S),
    (" | ", O),
    ("\"user\"", S),
    (";\n}\n\n", P),
    ("const", K),
    (" fetchUser ", F),
    ("= ", O),
    ("async", K),
    (" (", P),
    ("id", A),
    (": ", O),
    ("number", C),
    ("): ", O),
    ("Promise", C),
    ("<", O),
    ("User", C),
    ("> ", O),
    ("=> ", O),
    ("{\n  ", P),
    ("const", K),
    (" response = ", P),
    ("await", K),
    (" ", P),
    ("fetch", F),
    ("(`/users/${", S),
    ("id", A),
    ("}`);\n  ", S),
    ("return", K),
    (" response", P),
    (".", O),
    ("json", F),
    ("();\n};", P),
];

const CSHARP: &[(&str, StyleTag)] = &[
    ("using", K),
    (" Microsoft.AspNetCore.Mvc;\n\n", P),
    ("namespace", K),
    (" Api.Controllers\n{\n  [", P),
    ("ApiController", C),
    ("]\n  [", P),
    ("Route", C),
    ("(", P),
    ("\"api/[controller]\"", S),
    (")]\n  ", P),
    ("public", K),
    (" ", P),
    ("class", K),
    (" UserController ", C),
    (": ", O),
    ("ControllerBase", C),
    ("\n  {\n    [", P),
    ("HttpGet", C),
    ("]\n    ", P),
    ("public", K),
    (" ", P),
    ("async", K),
    (" Task<", P),
    ("IActionResult", C),
    ("> GetUsers()\n    {\n      ", P),
    ("var", K),
    (" users = ", P),
    ("await", K),
    (" _context", P),
    (".", O),
    ("Users\n        ", P),
    (".", O),
    ("Where", F),
    ("(u ", P),
    ("=>", O),
    (" u", P),
    (".", O),
    ("IsActive)\n        ", P),
    (".", O),
    ("ToListAsync", F),
    ("();\n\n      ", P),
    ("return", K),
    (" ", P),
    ("Ok", F),
    ("(users);\n    }\n  }\n}", P),
];

const CPP: &[(&str, StyleTag)] = &[
    ("#include", K),
    (" <iostream>\n", P),
    ("#include", K),
    (" <vector>\n", P),
    ("#include", K),
    (" <algorithm>\n\n", P),
    ("int", C),
    (" main", F),
    ("() {\n  std::", P),
    ("vector", C),
    ("<", O),
    ("int", C),
    ("> numbers = {", P),
    ("5", N),
    (", ", P),
    ("2", N),
    (", ", P),
    ("8", N),
    (", ", P),
    ("1", N),
    (", ", P),
    ("9", N),
    ("};\n\n  std::", P),
    ("sort", F),
    ("(numbers", P),
    (".", O),
    ("begin(), numbers", P),
    (".", O),
    ("end());\n\n  ", P),
    ("for", K),
    (" (", P),
    ("const", K),
    (" ", P),
    ("auto", K),
    ("& num : numbers) {\n    std::cout ", P),
    ("<<", O),
    (" num ", P),
    ("<<", O),
    (" ", P),
    ("\" \"", S),
    (";\n  }\n\n  ", P),
    ("return", K),
    (" ", P),
    ("0", N),
    (";\n}", P),
];

const STOCK: &[Stock] = &[
    ("python", "scraper.py", "Python", "fab fa-python", Color::RGB(0x37, 0x76, 0xab), PYTHON),
    ("javascript", "api.js", "JavaScript", "fab fa-js", Color::RGB(0xf7, 0xdf, 0x1e), JAVASCRIPT),
    ("angular", "app.component.ts", "Angular", "fab fa-angular", Color::RGB(0xdd, 0x00, 0x31), ANGULAR),
    ("typescript", "types.ts", "TypeScript", "fab fa-js-square", Color::RGB(0x31, 0x78, 0xc6), TYPESCRIPT),
    ("csharp", "UserController.cs", "C#", "fas fa-code", Color::RGB(0x68, 0x21, 0x7a), CSHARP),
    ("cpp", "vector.cpp", "C++", "fas fa-code", Color::RGB(0x00, 0x59, 0x9c), CPP),
];

impl Deck {
    /// The six stock snippets: Python, JavaScript, Angular, TypeScript, C# and C++.
    pub fn stock() -> Self {
        let mut snippets = OrderMap::new();
        for (id, label, language, icon, icon_color, segments) in STOCK {
            let snippet = Snippet {
                id: id.to_string(),
                chrome: Chrome {
                    label: label.to_string(),
                    language: language.to_string(),
                    icon: icon.to_string(),
                    icon_color: *icon_color,
                },
                segments: segments
                    .iter()
                    .map(|(text, style)| Segment::new(text, *style))
                    .collect(),
            };
            snippets.insert(id.to_string(), snippet);
        }
        Self { snippets }
    }
}
