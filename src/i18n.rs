//! Fixed UI strings in English, French and Arabic.
//!
//! Content text lives in the JSON documents and goes through
//! [`localize`](crate::localize); this module only covers the site chrome
//! (navigation, headings, empty states, error banner). Unknown languages use
//! the English table.

/// UI strings of one language.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Translations {
    pub nav_home: &'static str,
    pub nav_about: &'static str,
    pub nav_privacy: &'static str,
    pub search_placeholder: &'static str,
    pub page_title_home: &'static str,
    pub page_title_subject: &'static str,
    pub page_title_content: &'static str,
    /// Contains a `{subjectName}` slot, see [`Translations::subject_meta_description`].
    pub meta_description_subject: &'static str,
    pub footer_copyright: &'static str,
    pub error_title: &'static str,
    pub error_message: &'static str,
    pub error_suggestion: &'static str,
    pub lessons: &'static str,
    pub exercises: &'static str,
    pub summaries: &'static str,
    pub solution_title: &'static str,
    pub show_solution_btn: &'static str,
    pub empty_content: &'static str,
    pub no_content_for_subject: &'static str,
    pub no_results: &'static str,
}

const EN: Translations = Translations {
    nav_home: "Home",
    nav_about: "About Us",
    nav_privacy: "Privacy",
    search_placeholder: "Search for lessons, exercises...",
    page_title_home: "EduMaroc - Your Learning Platform",
    page_title_subject: "Subject - EduMaroc",
    page_title_content: "Content - EduMaroc",
    meta_description_subject: "Explore lessons, exercises, and summaries for {subjectName} on EduMaroc, your platform for the Moroccan curriculum.",
    footer_copyright: "© 2025 EduMaroc. All rights reserved.",
    error_title: "Content Error:",
    error_message: "We couldn't load the necessary content for the site.",
    error_suggestion: "Please check your network connection.",
    lessons: "Lessons",
    exercises: "Exercises",
    summaries: "Summaries",
    solution_title: "Solution",
    show_solution_btn: "Solution",
    empty_content: "Content for this section will be added soon.",
    no_content_for_subject: "Content for this subject will be added soon. Please check back later.",
    no_results: "No results found.",
};

const FR: Translations = Translations {
    nav_home: "Accueil",
    nav_about: "À Propos",
    nav_privacy: "Confidentialité",
    search_placeholder: "Rechercher des leçons, exercices...",
    page_title_home: "EduMaroc - Votre Plateforme d'Apprentissage",
    page_title_subject: "Matière - EduMaroc",
    page_title_content: "Contenu - EduMaroc",
    meta_description_subject: "Explorez les leçons, exercices et résumés pour la matière {subjectName} sur EduMaroc, votre plateforme pour le programme marocain.",
    footer_copyright: "© 2025 EduMaroc. Tous droits réservés.",
    error_title: "Erreur de Contenu :",
    error_message: "Nous n'avons pas pu charger le contenu nécessaire pour le site.",
    error_suggestion: "Veuillez vérifier votre connexion réseau.",
    lessons: "Leçons",
    exercises: "Exercices",
    summaries: "Résumés",
    solution_title: "Solution",
    show_solution_btn: "Solution",
    empty_content: "Le contenu de cette section sera bientôt ajouté.",
    no_content_for_subject: "Le contenu de cette matière sera bientôt ajouté. Veuillez revenir plus tard.",
    no_results: "Aucun résultat trouvé.",
};

const AR: Translations = Translations {
    nav_home: "الرئيسية",
    nav_about: "من نحن",
    nav_privacy: "الخصوصية",
    search_placeholder: "ابحث عن دروس، تمارين...",
    page_title_home: "EduMaroc - منصتك التعليمية",
    page_title_subject: "مادة - EduMaroc",
    page_title_content: "محتوى - EduMaroc",
    meta_description_subject: "استكشف الدروس والتمارين والملخصات لمادة {subjectName} على EduMaroc، منصتك للمنهاج المغربي.",
    footer_copyright: "© 2025 EduMaroc. جميع الحقوق محفوظة.",
    error_title: "خطأ في المحتوى:",
    error_message: "لم نتمكن من تحميل المحتوى اللازم للموقع.",
    error_suggestion: "يرجى التحقق من اتصالك بالشبكة.",
    lessons: "الدروس",
    exercises: "التمارين",
    summaries: "الملخصات",
    solution_title: "الحل",
    show_solution_btn: "الحل",
    empty_content: "سيتم إضافة المحتوى لهذا القسم قريبا.",
    no_content_for_subject: "سيتم إضافة محتوى لهذه المادة قريبا. يرجى المراجعة لاحقا.",
    no_results: "لا توجد نتائج.",
};

/// The table for `lang`, English for anything unknown.
pub fn translations(lang: &str) -> &'static Translations {
    match lang {
        "fr" => &FR,
        "ar" => &AR,
        _ => &EN,
    }
}

impl Translations {
    /// Heading for an item collection.
    pub fn kind_label(&self, kind: crate::types::ItemKind) -> &'static str {
        use crate::types::ItemKind;
        match kind {
            ItemKind::Lessons => self.lessons,
            ItemKind::Exercises => self.exercises,
            ItemKind::Summaries => self.summaries,
        }
    }

    pub fn subject_meta_description(&self, subject_name: &str) -> String {
        self.meta_description_subject
            .replacen("{subjectName}", subject_name, 1)
    }

    /// One-line banner shown when the master document is unavailable.
    pub fn global_error(&self) -> String {
        format!(
            "{} {} {}",
            self.error_title, self.error_message, self.error_suggestion
        )
    }
}

/// Text direction attribute value.
pub fn direction(lang: &str) -> &'static str {
    if lang == "ar" { "rtl" } else { "ltr" }
}

/// Label of the language toggle pointing at `lang`.
pub fn native_name(lang: &str) -> &str {
    match lang {
        "fr" => "Français",
        "ar" => "العربية",
        "en" => "English",
        other => other,
    }
}

/// The language after `current` in toggle order, wrapping around.
///
/// A language not in `languages` toggles to the first one.
pub fn next_language<'a>(languages: &'a [String], current: &str) -> Option<&'a str> {
    let next = match languages.iter().position(|l| l == current) {
        Some(i) => languages.get((i + 1) % languages.len()),
        None => languages.first(),
    };
    next.map(String::as_str)
}
