use crate::GenerationMode;

/// Build the instruction sent to the model for one lesson artifact.
///
/// The wording is Arabic because the generated content targets the
/// Palestinian grade-10 curriculum.
#[must_use]
pub fn build_prompt(subject: &str, semester: &str, topic: &str, mode: GenerationMode) -> String {
    let (task, requirements) = match mode {
        GenerationMode::Worksheet => (
            "ورقة عمل شاملة ومنظمة",
            "يجب أن تتضمن ورقة العمل: أهداف تعليمية، أقسام متنوعة (أسئلة اختيار من متعدد، صح وخطأ، أسئلة مقالية)، وخلاصة.",
        ),
        GenerationMode::Activity => (
            "نشاط صفي إبداعي وتفاعلي",
            "يجب أن يتضمن النشاط: أهداف تعليمية، أنشطة تفاعلية (عملي، مجموعات، إلكتروني)، لعبة تنافسية، وروابط إثرائية.",
        ),
    };

    format!(
        "أنت خبير تربوي متخصص في المنهاج الفلسطيني للصف العاشر.\n\
         المهمة: تصميم {task}.\n\
         المبحث: {subject}\n\
         الفصل الدراسي: {semester}\n\
         عنوان الدرس/الموضوع: {topic}\n\
         نوع المخرج المطلوب: {mode}\n\
         \n\
         {requirements}\n\
         \n\
         يجب أن يكون الرد بتنسيق JSON حصراً."
    )
}
